//! Touch controls: maps widget events to controller commands.
//!
//! Transport buttons become [`Command`]s on the controller's channel. The
//! volume slider bypasses the controller entirely and goes straight to the
//! audio sink; volume is not part of the playback state.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::Sender;
use embassy_sync::mutex::Mutex;
use platform::{AudioSink, InputEvent, SinkError, VolumePercent, Widget};
use playback::Command;

/// A user action on the now-playing screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Previous-track button.
    Previous,
    /// Play/pause button.
    TogglePlayPause,
    /// Next-track button.
    Next,
    /// Volume slider released at this level.
    Volume(VolumePercent),
}

impl Control {
    /// Map a raw widget event. Slider values above 100 clamp to 100.
    pub fn from_input(event: InputEvent) -> Self {
        match event {
            InputEvent::Clicked(Widget::Previous) => Self::Previous,
            InputEvent::Clicked(Widget::PlayPause) => Self::TogglePlayPause,
            InputEvent::Clicked(Widget::Next) => Self::Next,
            InputEvent::VolumeChanged(level) => Self::Volume(VolumePercent::new(level)),
        }
    }

    /// Controller command for transport controls, `None` for volume.
    pub fn command(self) -> Option<Command> {
        match self {
            Self::Previous => Some(Command::Previous),
            Self::TogglePlayPause => Some(Command::TogglePlayPause),
            Self::Next => Some(Command::Next),
            Self::Volume(_) => None,
        }
    }
}

/// Routes controls to the controller's command channel or to the sink.
pub struct ControlRouter<'a, CM, SM, A, const N: usize>
where
    CM: RawMutex,
    SM: RawMutex,
    A: AudioSink,
{
    commands: Sender<'a, CM, Command, N>,
    sink: &'a Mutex<SM, A>,
}

impl<'a, CM, SM, A, const N: usize> ControlRouter<'a, CM, SM, A, N>
where
    CM: RawMutex,
    SM: RawMutex,
    A: AudioSink,
{
    /// Create a router over the controller's command sender and the shared sink.
    pub fn new(commands: Sender<'a, CM, Command, N>, sink: &'a Mutex<SM, A>) -> Self {
        Self { commands, sink }
    }

    /// Deliver one widget event.
    ///
    /// Transport commands wait for room in the channel. Volume changes hold
    /// the sink lock only for the duration of the update.
    pub async fn dispatch(&self, event: InputEvent) -> Result<(), SinkError> {
        let control = Control::from_input(event);
        if let Some(command) = control.command() {
            tracing::debug!(command = command.as_str(), "ui command");
            self.commands.send(command).await;
            return Ok(());
        }
        if let Control::Volume(level) = control {
            tracing::debug!(level = level.get(), "volume slider");
            self.sink.lock().await.set_volume(level).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;
    use embassy_sync::channel::Channel;
    use platform::mocks::MockSink;

    #[test]
    fn test_buttons_map_to_transport_commands() {
        let cases = [
            (Widget::Previous, Command::Previous),
            (Widget::PlayPause, Command::TogglePlayPause),
            (Widget::Next, Command::Next),
        ];
        for (widget, command) in cases {
            assert_eq!(Control::from_input(InputEvent::Clicked(widget)).command(), Some(command));
        }
    }

    #[test]
    fn test_slider_clamps_and_has_no_command() {
        let control = Control::from_input(InputEvent::VolumeChanged(180));
        assert_eq!(control, Control::Volume(VolumePercent::new(100)));
        assert_eq!(control.command(), None);
    }

    #[tokio::test]
    async fn test_router_sends_commands_and_sets_volume_directly() {
        let channel: Channel<NoopRawMutex, Command, 4> = Channel::new();
        let sink = Mutex::<NoopRawMutex, _>::new(MockSink::new());
        let router = ControlRouter::new(channel.sender(), &sink);

        router.dispatch(InputEvent::Clicked(Widget::Next)).await.unwrap();
        router.dispatch(InputEvent::VolumeChanged(0)).await.unwrap();
        router.dispatch(InputEvent::Clicked(Widget::PlayPause)).await.unwrap();

        assert_eq!(channel.try_receive().ok(), Some(Command::Next));
        assert_eq!(channel.try_receive().ok(), Some(Command::TogglePlayPause));
        assert!(channel.try_receive().is_err());

        let sink = sink.lock().await;
        assert_eq!(sink.volumes, [VolumePercent::MUTE]);
        assert!(sink.mutes.is_empty());
    }
}
