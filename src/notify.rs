use chrono::NaiveDate;
use futures::future::BoxFuture;

/// Payload for the post-mark confirmation message.
#[derive(Debug, Clone)]
pub struct Notification {
    pub recipient: String,
    pub name: String,
    pub lecture: String,
    pub date: NaiveDate,
    pub time: String,
    pub attendance_rate: u32,
    pub streak: u32,
}

/// Abstract delivery capability. Callers treat failures as non-fatal: a
/// notification is never allowed to fail or roll back an attendance write.
pub trait Notifier: Send + Sync {
    fn notify(&self, note: Notification) -> BoxFuture<'static, anyhow::Result<()>>;
}

/// Default sink that records the confirmation in the application log.
/// Real delivery (SMTP, push) plugs in behind the same trait.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, note: Notification) -> BoxFuture<'static, anyhow::Result<()>> {
        Box::pin(async move {
            tracing::info!(
                recipient = %note.recipient,
                name = %note.name,
                lecture = %note.lecture,
                date = %note.date,
                time = %note.time,
                attendance_rate = note.attendance_rate,
                streak = note.streak,
                "Attendance confirmation"
            );
            Ok(())
        })
    }
}
