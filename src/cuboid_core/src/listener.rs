use crate::success;
use crossbeam_channel::Sender;
use log::{debug, info, trace};

/// Receives what the engine wants the outside world to know.
pub trait CubeListener {
    /// A rejected command or other short user-facing text.
    fn on_message(&mut self, message: &str) {
        let _ = message;
    }

    /// A scramble, algorithm playback or test run came to an end.
    fn on_move_sequence_completed(&mut self) {}

    fn on_solved(&mut self) {}
}

/// Forwards notifications to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogListener;

impl CubeListener for LogListener {
    fn on_message(&mut self, message: &str) {
        info!("{message}");
    }

    fn on_move_sequence_completed(&mut self) {
        debug!("Move sequence completed");
    }

    fn on_solved(&mut self) {
        info!(success!("Cube solved"));
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Message(String),
    MoveSequenceCompleted,
    Solved,
}

impl CubeListener for Sender<Notification> {
    fn on_message(&mut self, message: &str) {
        if self.send(Notification::Message(message.to_owned())).is_err() {
            trace!("Dropped message, receiver is gone");
        }
    }

    fn on_move_sequence_completed(&mut self) {
        if self.send(Notification::MoveSequenceCompleted).is_err() {
            trace!("Dropped completion, receiver is gone");
        }
    }

    fn on_solved(&mut self) {
        if self.send(Notification::Solved).is_err() {
            trace!("Dropped solved notification, receiver is gone");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test]
    fn channel_sender_forwards_in_order() {
        let (mut tx, rx) = crossbeam_channel::unbounded();
        tx.on_message("hello");
        tx.on_move_sequence_completed();
        tx.on_solved();
        assert_eq!(
            rx.try_iter().collect::<Vec<_>>(),
            vec![
                Notification::Message("hello".to_owned()),
                Notification::MoveSequenceCompleted,
                Notification::Solved,
            ]
        );
    }

    #[test_log::test]
    fn disconnected_channel_is_ignored() {
        let (mut tx, rx) = crossbeam_channel::unbounded::<Notification>();
        drop(rx);
        tx.on_solved();
    }
}
