use chrono::{DateTime, Local, Utc};
use itertools::Itertools;

// Digits grouped by thousands, "12345678" => "12,345,678"
pub fn format_thousands(num: u64) -> String {
    let digits = num.to_string().chars().collect::<Vec<char>>();
    digits
        .rchunks(3)
        .rev()
        .map(|group| group.iter().collect::<String>())
        .join(",")
}

pub fn format_timestamp(time: &DateTime<Utc>) -> String {
    format!("{}", time.with_timezone(&Local).format("%d/%m/%Y %H:%M:%S"))
}
