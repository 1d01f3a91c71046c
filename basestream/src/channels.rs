//!
//! Various channel types for basestream.
//!

use tokio::sync::mpsc;

use crate::record::Record;

/// Record channel Sender.
pub type RecordTx = mpsc::UnboundedSender<Record>;

/// Record channel Receiver.
pub type RecordRx = mpsc::UnboundedReceiver<Record>;

///
/// Create a record channel for handing records to another task.
///
pub fn create_record_channel() -> (RecordTx, RecordRx) {
    mpsc::unbounded_channel()
}
