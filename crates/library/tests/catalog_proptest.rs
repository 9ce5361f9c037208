//! Property-based tests for the bounded catalog and path composition.

use library::{Catalog, Scanner, Track};
use platform::config::MAX_PATH_BYTES;

proptest::proptest! {
    /// Pushing more tracks than fit never grows the catalog past capacity,
    /// and the surviving tracks are the first ones pushed, in order.
    #[test]
    fn catalog_keeps_first_n_in_order(count in 0usize..40) {
        let mut catalog = Catalog::<16>::new();
        for i in 0..count {
            let _ = catalog.push(Track::from_path(&format!("/sdcard/{i}.mp3")).unwrap());
        }
        assert_eq!(catalog.len(), count.min(16));
        for (i, track) in catalog.iter().enumerate() {
            assert_eq!(track.name(), format!("{i}.mp3"));
        }
    }

    /// A composed path is accepted exactly when it fits the path limit.
    #[test]
    fn compose_path_accepts_iff_within_limit(name_len in 1usize..400) {
        let name = "n".repeat(name_len);
        let composed = Scanner::compose_path("/sdcard", &name);
        let total = "/sdcard/".len() + name_len;
        assert_eq!(composed.is_ok(), total <= MAX_PATH_BYTES);
    }

    /// The display name is always the final path segment.
    #[test]
    fn name_is_final_segment(name in "[a-zA-Z0-9 ._-]{1,40}") {
        let track = Track::from_path(&format!("/sdcard/{name}")).unwrap();
        assert_eq!(track.name(), name);
    }
}
