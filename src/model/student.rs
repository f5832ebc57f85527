#[derive(Debug, sqlx::FromRow)]
pub struct Student {
    pub uid: u64, // BIGINT UNSIGNED
    pub name: String,
    pub email: String,
    pub pass: String,
    pub rfid: String,
}
