//! Built-in verses for the daily quiet-time page.

use chrono::{Datelike, NaiveDate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BibleVerse {
    pub reference: &'static str,
    pub text: &'static str,
}

const DAILY_VERSES: &[BibleVerse] = &[
    BibleVerse {
        reference: "빌립보서 4:13",
        text: "내게 능력 주시는 자 안에서 내가 모든 것을 할 수 있느니라",
    },
    BibleVerse {
        reference: "잠언 3:5",
        text: "너는 마음을 다하여 여호와를 신뢰하고 네 명철을 의지하지 말라",
    },
    BibleVerse {
        reference: "시편 23:1",
        text: "여호와는 나의 목자시니 내게 부족함이 없으리로다",
    },
];

pub fn daily_verses() -> &'static [BibleVerse] {
    DAILY_VERSES
}

/// Verse shown on `date`; cycles through the list by day of the common era.
pub fn verse_for_date(date: NaiveDate) -> &'static BibleVerse {
    let day = date.num_days_from_ce().rem_euclid(DAILY_VERSES.len() as i32);
    &DAILY_VERSES[day as usize]
}

#[cfg(test)]
mod tests {
    use super::{daily_verses, verse_for_date};
    use chrono::NaiveDate;

    #[test]
    fn consecutive_days_rotate_through_all_verses() {
        let start = NaiveDate::from_ymd_opt(2024, 7, 28).unwrap();
        let mut seen = Vec::new();
        for offset in 0..3 {
            let verse = verse_for_date(start + chrono::Duration::days(offset));
            assert!(!seen.contains(&verse.reference));
            seen.push(verse.reference);
        }
        assert_eq!(seen.len(), daily_verses().len());
    }

    #[test]
    fn same_day_is_stable() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert_eq!(verse_for_date(date), verse_for_date(date));
    }
}
