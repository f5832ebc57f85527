use serde::Serialize;

/// One named lecture with a fixed daily hour range, recurring every working
/// day. Slots are non-overlapping and ordered by start hour.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct LectureSlot {
    pub cid: u64,
    pub cname: String,
    /// Wall-clock start hour, 0-23.
    pub start_time: u32,
    /// Wall-clock end hour, exclusive; always greater than `start_time`.
    pub end_time: u32,
}
