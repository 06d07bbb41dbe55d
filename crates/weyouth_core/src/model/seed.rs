//! Built-in first-run dataset.
//!
//! Used only when a collection key has never been written. A key that exists
//! but fails to parse never falls back to these values.

use crate::model::notice::{Notice, NoticeCategory};
use crate::model::post::{Post, PostCategory};
use crate::model::schedule::{ScheduleEntry, WorshipInfo};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};

pub fn default_notices() -> Vec<Notice> {
    vec![
        Notice {
            id: "1".to_string(),
            title: "여름 수련회 \"Deep Dive\" 안내".to_string(),
            content: "올해 여름 수련회는 8월 14일부터 16일까지 진행됩니다. 많은 기대 부탁드려요!"
                .to_string(),
            date: date(2024, 7, 20),
            author: "김선생님".to_string(),
            category: NoticeCategory::Event,
            image_url: None,
        },
        Notice {
            id: "2".to_string(),
            title: "이번 주 주일 예배 안내".to_string(),
            content: "장소: 지하 1층 청소년부실, 시간: 오전 10시 30분. 지각하지 마세요!".to_string(),
            date: date(2024, 7, 25),
            author: "박목사님".to_string(),
            category: NoticeCategory::Worship,
            image_url: None,
        },
    ]
}

pub fn default_posts() -> Vec<Post> {
    vec![
        Post {
            id: "101".to_string(),
            title: "오늘 시험 잘 보게 기도해주세요!".to_string(),
            content: "수학 시험인데 너무 떨려요... 잘 볼 수 있게 응원해주세요!".to_string(),
            author_id: "u1".to_string(),
            author_name: "이수진".to_string(),
            category: PostCategory::Prayer,
            created_at: instant(2024, 7, 26, 8, 30),
            likes: 12,
            comments: Vec::new(),
        },
        Post {
            id: "102".to_string(),
            title: "편의점 신상 추천!".to_string(),
            content: "이번에 나온 불닭볶음면 신메뉴 진짜 맛있어요 ㅋㅋㅋ 다들 드셔보셨나요?"
                .to_string(),
            author_id: "u2".to_string(),
            author_name: "최민수".to_string(),
            category: PostCategory::Talk,
            created_at: instant(2024, 7, 26, 12, 0),
            likes: 5,
            comments: Vec::new(),
        },
    ]
}

pub fn default_schedule() -> Vec<ScheduleEntry> {
    vec![
        ScheduleEntry {
            kind: Some("practice".to_string()),
            ..ScheduleEntry::new("월", "고등부 찬양팀 연습", "19:00")
        },
        ScheduleEntry {
            kind: Some("meeting".to_string()),
            ..ScheduleEntry::new("목", "중등부 소그룹 모임", "18:30")
        },
        ScheduleEntry {
            is_main: Some(true),
            kind: Some("worship".to_string()),
            ..ScheduleEntry::new("주일", "주일 대예배 & 분반공부", "10:30")
        },
    ]
}

pub fn default_worship_info() -> WorshipInfo {
    WorshipInfo {
        time: "10:30".to_string(),
        location: "지하 1층".to_string(),
    }
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

fn instant(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

#[cfg(test)]
mod tests {
    use super::{default_notices, default_posts, default_schedule};

    #[test]
    fn seed_dates_are_real_calendar_values() {
        assert_eq!(default_notices()[0].date.to_string(), "2024-07-20");
        assert_eq!(
            default_posts()[0].created_at.to_rfc3339(),
            "2024-07-26T08:30:00+00:00"
        );
    }

    #[test]
    fn only_sunday_service_is_marked_main() {
        let mains: Vec<_> = default_schedule()
            .into_iter()
            .filter(|entry| entry.is_main == Some(true))
            .map(|entry| entry.day)
            .collect();
        assert_eq!(mains, vec!["주일".to_string()]);
    }
}
