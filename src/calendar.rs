use std::sync::LazyLock;

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use regex::Regex;

use crate::api::types::{LabelsMap, NotesMap};

pub const GRID_CELLS: usize = 42;
pub const PREVIEW_CHARS: usize = 20;
pub const MAX_PREVIEWS: usize = 2;

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

static DATE_KEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid date key regex"));

// --- DateKey ---

/// Zero-padded `YYYY-MM-DD` for a calendar-local date.
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn is_date_key_format(s: &str) -> bool {
    DATE_KEY_RE.is_match(s)
}

/// Strict inverse of [`date_key`].
pub fn parse_date_key(s: &str) -> Option<NaiveDate> {
    if !is_date_key_format(s) {
        return None;
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// `Monday, January 15, 2024`
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

/// `Mon, Jan 15`
pub fn format_short_date(date: NaiveDate) -> String {
    date.format("%a, %b %-d").to_string()
}

/// `Monday, Jan 15`, used for plan headings.
pub fn format_plan_date(date: NaiveDate) -> String {
    date.format("%A, %b %-d").to_string()
}

pub fn month_name(month: u32) -> Option<&'static str> {
    MONTH_NAMES.get(month.checked_sub(1)? as usize).copied()
}

// --- Month ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct YearMonth {
    pub year: i32,
    /// 1..=12
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Self {
        Self {
            year,
            month: month.clamp(1, 12),
        }
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn prev(self) -> Self {
        if self.month == 1 {
            Self::new(self.year - 1, 12)
        } else {
            Self::new(self.year, self.month - 1)
        }
    }

    pub fn next(self) -> Self {
        if self.month == 12 {
            Self::new(self.year + 1, 1)
        } else {
            Self::new(self.year, self.month + 1)
        }
    }

    pub fn first_day(self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default()
    }

    pub fn contains(self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// `January 2024`
    pub fn title(self) -> String {
        format!("{} {}", month_name(self.month).unwrap_or(""), self.year)
    }
}

// --- Grid ---

#[derive(Debug, Clone, PartialEq)]
pub struct CellLabel {
    pub text: String,
    pub color: String,
    /// `color` with a `20` alpha suffix.
    pub background: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridCell {
    pub date: NaiveDate,
    pub key: String,
    pub day: u32,
    pub other_month: bool,
    pub today: bool,
    pub selected: bool,
    pub label: Option<CellLabel>,
    pub previews: Vec<String>,
    /// Notes beyond the previews, rendered as `+N more`.
    pub more: Option<usize>,
}

/// First cell of the grid: the Sunday on or before the 1st.
pub fn grid_start(month: YearMonth) -> NaiveDate {
    let first = month.first_day();
    let offset = first.weekday().num_days_from_sunday() as i64;
    first - Duration::days(offset)
}

pub fn month_grid(
    month: YearMonth,
    today: NaiveDate,
    selected: Option<&str>,
    notes: &NotesMap,
    labels: &LabelsMap,
) -> Vec<GridCell> {
    let start = grid_start(month);
    (0..GRID_CELLS as i64)
        .map(|i| {
            let date = start + Duration::days(i);
            let key = date_key(date);
            let day_notes = notes.get(&key).map(Vec::as_slice).unwrap_or(&[]);
            let label = labels.get(&key).map(|l| CellLabel {
                text: l.label.clone(),
                color: l.color.clone(),
                background: format!("{}20", l.color),
            });
            GridCell {
                date,
                day: date.day(),
                other_month: !month.contains(date),
                today: date == today,
                selected: selected == Some(key.as_str()),
                label,
                previews: day_notes
                    .iter()
                    .take(MAX_PREVIEWS)
                    .map(|n| preview(n))
                    .collect(),
                more: (day_notes.len() > MAX_PREVIEWS).then(|| day_notes.len() - MAX_PREVIEWS),
                key,
            }
        })
        .collect()
}

/// Index of `key` in a rendered grid, if present.
pub fn cell_index(cells: &[GridCell], key: &str) -> Option<usize> {
    cells.iter().position(|c| c.key == key)
}

pub fn preview(note: &str) -> String {
    if note.chars().count() > PREVIEW_CHARS {
        let head: String = note.chars().take(PREVIEW_CHARS).collect();
        format!("{}...", head)
    } else {
        note.to_string()
    }
}

// --- Week ---

#[derive(Debug, Clone, PartialEq)]
pub struct WeekDay {
    pub key: String,
    pub weekday: String,
    pub day: u32,
    pub note_count: usize,
    pub today: bool,
}

impl WeekDay {
    pub fn count_text(&self) -> String {
        if self.note_count == 1 {
            "1 note".to_string()
        } else {
            format!("{} notes", self.note_count)
        }
    }
}

/// Seven consecutive days starting at `today`.
pub fn week_overview(today: NaiveDate, notes: &NotesMap) -> Vec<WeekDay> {
    (0..7)
        .map(|i| {
            let date = today + Duration::days(i);
            let key = date_key(date);
            WeekDay {
                note_count: notes.get(&key).map_or(0, Vec::len),
                weekday: date.format("%a").to_string(),
                day: date.day(),
                today: i == 0,
                key,
            }
        })
        .collect()
}

/// Monday and Sunday of the week containing `today`.
pub fn current_week_span(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let week = today.week(Weekday::Mon);
    (week.first_day(), week.last_day())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::Label;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn date_key_is_zero_padded() {
        assert_eq!(date_key(d(2024, 3, 5)), "2024-03-05");
    }

    #[test]
    fn parse_round_trips_every_day_of_a_leap_year() {
        let mut date = d(2024, 1, 1);
        while date.year() == 2024 {
            assert_eq!(parse_date_key(&date_key(date)), Some(date));
            date += Duration::days(1);
        }
    }

    #[test]
    fn parse_rejects_bad_shapes_and_impossible_dates() {
        assert_eq!(parse_date_key("2024-1-5"), None);
        assert_eq!(parse_date_key("2024-02-30"), None);
        assert_eq!(parse_date_key(" 2024-01-05"), None);
        assert_eq!(parse_date_key("2024/01/05"), None);
    }

    #[test]
    fn format_shape_check_does_not_validate_calendar() {
        assert!(is_date_key_format("2024-13-45"));
        assert!(!is_date_key_format("24-01-01"));
    }

    #[test]
    fn long_and_short_formats() {
        assert_eq!(format_long_date(d(2024, 1, 15)), "Monday, January 15, 2024");
        assert_eq!(format_short_date(d(2024, 1, 5)), "Fri, Jan 5");
        assert_eq!(format_plan_date(d(2024, 1, 15)), "Monday, Jan 15");
    }

    #[test]
    fn month_navigation_crosses_years() {
        assert_eq!(YearMonth::new(2024, 1).prev(), YearMonth::new(2023, 12));
        assert_eq!(YearMonth::new(2023, 12).next(), YearMonth::new(2024, 1));
        assert_eq!(YearMonth::new(2024, 6).next().prev(), YearMonth::new(2024, 6));
    }

    #[test]
    fn month_title() {
        assert_eq!(YearMonth::new(2024, 1).title(), "January 2024");
    }

    #[test]
    fn grid_is_always_42_cells_starting_on_sunday() {
        let today = d(2024, 1, 15);
        for m in 1..=12 {
            let cells = month_grid(
                YearMonth::new(2024, m),
                today,
                None,
                &NotesMap::new(),
                &LabelsMap::new(),
            );
            assert_eq!(cells.len(), 42);
            assert_eq!(cells[0].date.weekday(), Weekday::Sun);
            assert!(cells[0].date <= d(2024, m, 1));
        }
    }

    #[test]
    fn grid_starts_on_the_first_when_it_is_sunday() {
        // September 2024 starts on a Sunday
        let cells = month_grid(
            YearMonth::new(2024, 9),
            d(2024, 9, 10),
            None,
            &NotesMap::new(),
            &LabelsMap::new(),
        );
        assert_eq!(cells[0].key, "2024-09-01");
        assert!(!cells[0].other_month);
    }

    #[test]
    fn grid_marks_today_selected_and_other_month() {
        let cells = month_grid(
            YearMonth::new(2024, 1),
            d(2024, 1, 15),
            Some("2024-01-20"),
            &NotesMap::new(),
            &LabelsMap::new(),
        );
        // January 2024 starts on Monday, so cell 0 is Dec 31
        assert_eq!(cells[0].key, "2023-12-31");
        assert!(cells[0].other_month);
        assert_eq!(cells.iter().filter(|c| c.today).count(), 1);
        assert_eq!(cells.iter().filter(|c| c.selected).count(), 1);
        assert!(cells[cell_index(&cells, "2024-01-20").unwrap()].selected);
    }

    #[test]
    fn previews_truncate_and_count_overflow() {
        let mut notes = NotesMap::new();
        notes.insert(
            "2024-01-15".into(),
            vec![
                "Study linear algebra chapter 4".into(),
                "Gym".into(),
                "Call mom".into(),
                "Laundry".into(),
            ],
        );
        let cells = month_grid(
            YearMonth::new(2024, 1),
            d(2024, 1, 1),
            None,
            &notes,
            &LabelsMap::new(),
        );
        let cell = &cells[cell_index(&cells, "2024-01-15").unwrap()];
        assert_eq!(cell.previews, vec!["Study linear algebra...", "Gym"]);
        assert_eq!(cell.more, Some(2));
    }

    #[test]
    fn exactly_two_notes_have_no_overflow() {
        let mut notes = NotesMap::new();
        notes.insert("2024-01-15".into(), vec!["a".into(), "b".into()]);
        let cells = month_grid(
            YearMonth::new(2024, 1),
            d(2024, 1, 1),
            None,
            &notes,
            &LabelsMap::new(),
        );
        assert_eq!(cells[cell_index(&cells, "2024-01-15").unwrap()].more, None);
    }

    #[test]
    fn label_background_appends_alpha() {
        let mut labels = LabelsMap::new();
        labels.insert(
            "2024-01-20".into(),
            Label {
                label: "Exam".into(),
                color: "#dc3545".into(),
            },
        );
        let cells = month_grid(
            YearMonth::new(2024, 1),
            d(2024, 1, 1),
            None,
            &NotesMap::new(),
            &labels,
        );
        let label = cells[cell_index(&cells, "2024-01-20").unwrap()]
            .label
            .clone()
            .unwrap();
        assert_eq!(label.text, "Exam");
        assert_eq!(label.background, "#dc354520");
    }

    #[test]
    fn week_overview_counts_notes() {
        let mut notes = NotesMap::new();
        notes.insert("2024-01-15".into(), vec!["one".into()]);
        notes.insert("2024-01-17".into(), vec!["a".into(), "b".into()]);
        let week = week_overview(d(2024, 1, 15), &notes);
        assert_eq!(week.len(), 7);
        assert!(week[0].today);
        assert_eq!(week[0].weekday, "Mon");
        assert_eq!(week[0].count_text(), "1 note");
        assert_eq!(week[1].count_text(), "0 notes");
        assert_eq!(week[2].count_text(), "2 notes");
        assert_eq!(week[6].key, "2024-01-21");
    }

    #[test]
    fn week_span_runs_monday_to_sunday() {
        assert_eq!(
            current_week_span(d(2024, 1, 21)),
            (d(2024, 1, 15), d(2024, 1, 21))
        );
        assert_eq!(
            current_week_span(d(2024, 1, 15)),
            (d(2024, 1, 15), d(2024, 1, 21))
        );
    }
}
