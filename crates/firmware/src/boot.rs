//! Boot sequence for the Pocket Player.
//!
//! Initialization order (MUST be respected):
//!   1. Display panel
//!   2. Touch controller (shares the display's bus)
//!   3. Storage mount
//!   4. Audio: I2S channel + codec
//!   5. Ambient light strip
//!   6. UI toolkit (needs display + touch)
//!   7. Playback controller init (scans the card, builds the first screen)
//!   8. Ambient animation start
//!
//! Steps 1-6 are hardware bring-up and fatal on failure: there is no
//! degraded mode without a screen, storage or audio. Steps 7-8 belong to the
//! application and cannot fail; a missing card only yields an empty catalog.

/// Ordered list of boot sequence steps for documentation and testing.
///
/// # Correctness Invariants
///
/// - Touch is brought up after the display because both sit on the panel's
///   bus and the panel reset line also resets the touch controller.
/// - The toolkit is started only after display and touch drivers exist.
/// - The controller scans the card, so storage must be mounted before step 7.
pub const BOOT_SEQUENCE_STEPS: &[&str] = &[
    "1. Display: panel reset + init",
    "2. Touch: controller init on the panel bus",
    "3. Storage: mount card at /sdcard",
    "4. Audio: I2S channel + codec, default format and level",
    "5. Ambient light: LED strip channel",
    "6. Toolkit: display + input drivers registered",
    "7. Controller: scan catalog, initial screen",
    "8. Ambient: start animation task",
];

/// A fatal hardware bring-up stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BootStage {
    /// Display panel
    Display,
    /// Touch controller
    Touch,
    /// Storage mount
    Storage,
    /// I2S channel and codec
    Audio,
    /// Ambient light strip
    AmbientLight,
    /// UI toolkit
    Toolkit,
}

impl BootStage {
    /// Bring-up order.
    pub const ORDER: [Self; 6] = [
        Self::Display,
        Self::Touch,
        Self::Storage,
        Self::Audio,
        Self::AmbientLight,
        Self::Toolkit,
    ];

    /// Short label for logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Display => "display",
            Self::Touch => "touch",
            Self::Storage => "storage",
            Self::Audio => "audio",
            Self::AmbientLight => "ambient-light",
            Self::Toolkit => "toolkit",
        }
    }
}

/// Bring-up failed; the process cannot continue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[error("bring-up failed at {}", .stage.as_str())]
pub struct BootError {
    /// The stage that failed.
    pub stage: BootStage,
}

/// Board-specific bring-up of each peripheral.
///
/// Each method is called exactly once, in [`BootStage::ORDER`], by
/// [`bring_up`].
pub trait Board {
    /// Error type
    type Error: core::fmt::Debug + core::fmt::Display;

    /// Reset and initialise the display panel.
    fn init_display(&mut self) -> impl core::future::Future<Output = Result<(), Self::Error>>;

    /// Initialise the touch controller.
    fn init_touch(&mut self) -> impl core::future::Future<Output = Result<(), Self::Error>>;

    /// Mount the removable card.
    fn mount_storage(&mut self) -> impl core::future::Future<Output = Result<(), Self::Error>>;

    /// Bring up the I2S channel and the codec.
    fn init_audio(&mut self) -> impl core::future::Future<Output = Result<(), Self::Error>>;

    /// Bring up the LED strip channel.
    fn init_ambient_light(&mut self) -> impl core::future::Future<Output = Result<(), Self::Error>>;

    /// Start the UI toolkit.
    fn init_toolkit(&mut self) -> impl core::future::Future<Output = Result<(), Self::Error>>;
}

/// Run the fatal bring-up stages in order, stopping at the first failure.
pub async fn bring_up<B: Board>(board: &mut B) -> Result<(), BootError> {
    for stage in BootStage::ORDER {
        tracing::info!(stage = stage.as_str(), "bring-up");
        let result = match stage {
            BootStage::Display => board.init_display().await,
            BootStage::Touch => board.init_touch().await,
            BootStage::Storage => board.mount_storage().await,
            BootStage::Audio => board.init_audio().await,
            BootStage::AmbientLight => board.init_ambient_light().await,
            BootStage::Toolkit => board.init_toolkit().await,
        };
        if let Err(e) = result {
            tracing::error!(stage = stage.as_str(), error = %e, "bring-up failed");
            return Err(BootError { stage });
        }
    }
    tracing::info!("hardware bring-up complete");
    Ok(())
}
