use chrono::{FixedOffset, NaiveDate};
use dotenvy::dotenv;
use std::env;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub server_addr: String,

    /// Fixed local offset for scan resolution; lecture hours are wall-clock
    /// hours in this zone.
    pub tz_offset: FixedOffset,
    /// First day of the semester. Backfill and analytics never look earlier.
    pub college_start: NaiveDate,

    // Rate limiting
    pub rate_login_per_min: u32,
    pub rate_scan_per_min: u32,
    pub rate_read_per_min: u32,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let tz_offset_minutes: i32 = env::var("TZ_OFFSET_MINUTES")
            .unwrap_or_else(|_| "330".to_string()) // default IST, UTC+5:30
            .parse()
            .unwrap();

        Self {
            server_addr: env::var("SERVER_ADDR").expect("SERVER_ADDR must be set"),
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            tz_offset: FixedOffset::east_opt(tz_offset_minutes * 60)
                .expect("TZ_OFFSET_MINUTES out of range"),
            college_start: env::var("COLLEGE_START")
                .unwrap_or_else(|_| "2025-10-10".to_string())
                .parse()
                .unwrap(),

            rate_login_per_min: env::var("RATE_LOGIN_PER_MIN")
                .unwrap_or_else(|_| "60".to_string())
                .parse()
                .unwrap(),
            rate_scan_per_min: env::var("RATE_SCAN_PER_MIN")
                .unwrap_or_else(|_| "120".to_string())
                .parse()
                .unwrap(),
            rate_read_per_min: env::var("RATE_READ_PER_MIN")
                .unwrap_or_else(|_| "600".to_string())
                .parse()
                .unwrap(),
        }
    }
}
