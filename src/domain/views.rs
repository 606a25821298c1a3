use super::collection::Collection;
use super::datekey::DateKey;
use super::urgency::day_has_urgent;
use chrono::{DateTime, Datelike, Duration, Local, Months, NaiveDate};

/// Which grid the display layer is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Month,
    Week,
}

/// Everything the display layer needs to draw one day cell
#[derive(Debug, Clone, PartialEq)]
pub struct DayCell {
    pub key: DateKey,
    /// Day-of-month number shown in the cell
    pub day: u32,
    /// False for the leading cells that belong to the previous month
    pub in_month: bool,
    pub is_today: bool,
    pub has_todos: bool,
    /// Any todo on this day due within the urgency horizon right now
    pub has_urgent: bool,
}

/// Move the view cursor one step backward or forward: a month in month view,
/// seven days in week view. Month steps clamp to the last valid day.
pub fn step(cursor: NaiveDate, view: ViewMode, forward: bool) -> NaiveDate {
    match (view, forward) {
        (ViewMode::Month, true) => cursor
            .checked_add_months(Months::new(1))
            .unwrap_or(cursor),
        (ViewMode::Month, false) => cursor
            .checked_sub_months(Months::new(1))
            .unwrap_or(cursor),
        (ViewMode::Week, true) => cursor + Duration::days(7),
        (ViewMode::Week, false) => cursor - Duration::days(7),
    }
}

/// Cells for the month containing the cursor: leading out-of-month cells to
/// align the first day under its weekday (weeks start on Sunday), then one
/// cell per day of the month.
pub fn month_cells(
    cursor: NaiveDate,
    collection: &Collection,
    now: DateTime<Local>,
) -> Vec<DayCell> {
    let year = cursor.year();
    let month = cursor.month();
    let first = match NaiveDate::from_ymd_opt(year, month, 1) {
        Some(d) => d,
        None => return Vec::new(),
    };

    let leading = first.weekday().num_days_from_sunday() as i64;
    let mut cells = Vec::new();

    for offset in (1..=leading).rev() {
        let date = first - Duration::days(offset);
        cells.push(DayCell {
            key: DateKey::from_date(date),
            day: date.day(),
            in_month: false,
            is_today: false,
            has_todos: false,
            has_urgent: false,
        });
    }

    let mut date = first;
    while date.month() == month {
        cells.push(day_cell(date, true, collection, now));
        date = date + Duration::days(1);
    }

    cells
}

/// Cells for the Sunday-started week containing the cursor
pub fn week_cells(
    cursor: NaiveDate,
    collection: &Collection,
    now: DateTime<Local>,
) -> Vec<DayCell> {
    let start = cursor - Duration::days(cursor.weekday().num_days_from_sunday() as i64);
    (0..7)
        .map(|offset| day_cell(start + Duration::days(offset), true, collection, now))
        .collect()
}

fn day_cell(
    date: NaiveDate,
    in_month: bool,
    collection: &Collection,
    now: DateTime<Local>,
) -> DayCell {
    // Both grids go through from_month0, the 0-based convention the views
    // navigate months in, so they cannot drift apart on key format.
    let key = DateKey::from_month0(date.year(), date.month0(), date.day());
    let has_todos = !collection.todos(&key).is_empty();
    DayCell {
        key,
        day: date.day(),
        in_month,
        is_today: date == now.date_naive(),
        has_todos,
        has_urgent: has_todos && day_has_urgent(collection, &key, now),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NotificationTime;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 4, 5, 12, 0, 0).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_month_cells_lead_with_previous_month() {
        // April 1st 2024 is a Monday, so one leading Sunday cell from March
        let cells = month_cells(date(2024, 4, 5), &Collection::default(), now());
        assert_eq!(cells.len(), 1 + 30);
        assert!(!cells[0].in_month);
        assert_eq!(cells[0].day, 31);
        assert_eq!(cells[0].key, DateKey::new(2024, 3, 31));
        assert!(cells[1].in_month);
        assert_eq!(cells[1].key, DateKey::new(2024, 4, 1));
        assert_eq!(cells.last().unwrap().key, DateKey::new(2024, 4, 30));
    }

    #[test]
    fn test_month_and_week_views_agree_on_keys() {
        let month = month_cells(date(2024, 4, 5), &Collection::default(), now());
        let week = week_cells(date(2024, 4, 5), &Collection::default(), now());

        // The week of April 5th spills into March; compare the April cells
        for cell in week.iter().filter(|c| c.key.month == 4) {
            let twin = month
                .iter()
                .find(|c| c.in_month && c.day == cell.day)
                .unwrap();
            assert_eq!(twin.key, cell.key);
        }
    }

    #[test]
    fn test_week_starts_on_sunday() {
        // 2024-04-05 is a Friday; its week starts Sunday 2024-03-31
        let cells = week_cells(date(2024, 4, 5), &Collection::default(), now());
        assert_eq!(cells.len(), 7);
        assert_eq!(cells[0].key, DateKey::new(2024, 3, 31));
        assert_eq!(cells[6].key, DateKey::new(2024, 4, 6));
    }

    #[test]
    fn test_today_flag() {
        let cells = month_cells(date(2024, 4, 1), &Collection::default(), now());
        let todays: Vec<_> = cells.iter().filter(|c| c.is_today).collect();
        assert_eq!(todays.len(), 1);
        assert_eq!(todays[0].key, DateKey::new(2024, 4, 5));
    }

    #[test]
    fn test_has_todos_and_has_urgent_flags() {
        let mut collection = Collection::default();
        collection
            .add(DateKey::new(2024, 4, 3), "plain", None, now())
            .unwrap();
        collection
            .add(
                DateKey::new(2024, 4, 5),
                "due soon",
                NotificationTime::new(12, 15),
                now(),
            )
            .unwrap();

        let cells = month_cells(date(2024, 4, 1), &collection, now());
        let third = cells.iter().find(|c| c.in_month && c.day == 3).unwrap();
        assert!(third.has_todos);
        assert!(!third.has_urgent);

        let fifth = cells.iter().find(|c| c.in_month && c.day == 5).unwrap();
        assert!(fifth.has_todos);
        assert!(fifth.has_urgent);

        let fourth = cells.iter().find(|c| c.in_month && c.day == 4).unwrap();
        assert!(!fourth.has_todos);
    }

    #[test]
    fn test_step_month_clamps_to_month_end() {
        let stepped = step(date(2024, 1, 31), ViewMode::Month, true);
        assert_eq!(stepped, date(2024, 2, 29));
        let back = step(date(2024, 3, 31), ViewMode::Month, false);
        assert_eq!(back, date(2024, 2, 29));
    }

    #[test]
    fn test_step_week_moves_seven_days() {
        assert_eq!(step(date(2024, 4, 5), ViewMode::Week, true), date(2024, 4, 12));
        assert_eq!(step(date(2024, 4, 5), ViewMode::Week, false), date(2024, 3, 29));
    }
}
