//! Filtering and sorting over the candy table model.
//!
//! `CandyFilter` holds the active filter parameters and materializes the
//! visible row set as indices into the source model, so the table can keep
//! selection and scrolling in source terms.

use crate::amounts;
use crate::model::{CandyRecord, CandyTableModel};
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};

/// Preset buckets offered by the date filter combo. `Range` is the only one
/// driven by the explicit from/to pickers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DateFilterPreset {
    All,
    Today,
    ThisWeek,
    ThisMonth,
    LastMonth,
    ThisYear,
    Range,
}

impl DateFilterPreset {
    /// Combo ordering. The persisted preset index is positional in this list.
    pub const ALL: [DateFilterPreset; 7] = [
        DateFilterPreset::All,
        DateFilterPreset::Today,
        DateFilterPreset::ThisWeek,
        DateFilterPreset::ThisMonth,
        DateFilterPreset::LastMonth,
        DateFilterPreset::ThisYear,
        DateFilterPreset::Range,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DateFilterPreset::All => "All",
            DateFilterPreset::Today => "Today",
            DateFilterPreset::ThisWeek => "This week",
            DateFilterPreset::ThisMonth => "This month",
            DateFilterPreset::LastMonth => "Last month",
            DateFilterPreset::ThisYear => "This year",
            DateFilterPreset::Range => "Range...",
        }
    }

    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|p| p == self).unwrap_or(0)
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// Watch-only filter mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WatchOnlyFilter {
    All,
    Yes,
    No,
}

impl WatchOnlyFilter {
    pub const ALL: [WatchOnlyFilter; 3] = [
        WatchOnlyFilter::All,
        WatchOnlyFilter::Yes,
        WatchOnlyFilter::No,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            WatchOnlyFilter::All => "All",
            WatchOnlyFilter::Yes => "Yes",
            WatchOnlyFilter::No => "No",
        }
    }

    pub fn matches(&self, watch_only: bool) -> bool {
        match self {
            WatchOnlyFilter::All => true,
            WatchOnlyFilter::Yes => watch_only,
            WatchOnlyFilter::No => !watch_only,
        }
    }
}

/// Sortable table columns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortColumn {
    Status,
    WatchOnly,
    Date,
    AssetName,
    Address,
    Amount,
}

/// Midnight at the start of the given day.
pub fn day_start(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Half-open `[from, to)` bounds for a fixed preset evaluated against
/// `today`. `All` and `Range` carry no preset bounds of their own.
pub fn preset_bounds(
    preset: DateFilterPreset,
    today: NaiveDate,
) -> (Option<NaiveDateTime>, Option<NaiveDateTime>) {
    match preset {
        DateFilterPreset::All | DateFilterPreset::Range => (None, None),
        DateFilterPreset::Today => (Some(day_start(today)), None),
        DateFilterPreset::ThisWeek => {
            let monday =
                today - chrono::Duration::days(today.weekday().num_days_from_monday() as i64);
            (Some(day_start(monday)), None)
        }
        DateFilterPreset::ThisMonth => {
            let first = today.with_day(1).unwrap_or(today);
            (Some(day_start(first)), None)
        }
        DateFilterPreset::LastMonth => {
            let first_this = today.with_day(1).unwrap_or(today);
            let first_prev = if first_this.month() == 1 {
                NaiveDate::from_ymd_opt(first_this.year() - 1, 12, 1)
            } else {
                NaiveDate::from_ymd_opt(first_this.year(), first_this.month() - 1, 1)
            }
            .unwrap_or(first_this);
            (Some(day_start(first_prev)), Some(day_start(first_this)))
        }
        DateFilterPreset::ThisYear => {
            let jan_first = NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today);
            (Some(day_start(jan_first)), None)
        }
    }
}

/// Bounds for an explicit picker range. Both picked days are included: the
/// upper bound is midnight after the `to` day.
pub fn range_bounds(
    from: NaiveDate,
    to: NaiveDate,
) -> (Option<NaiveDateTime>, Option<NaiveDateTime>) {
    (Some(day_start(from)), to.succ_opt().map(day_start))
}

/// Strip a single trailing decimal point from a minimum-amount input, so a
/// value mid-typing ("12.") filters as the completed number ("12").
pub fn normalize_amount_input(input: &str) -> &str {
    input.strip_suffix('.').unwrap_or(input)
}

/// Active filter and sort parameters for the history table.
pub struct CandyFilter {
    date_from: Option<NaiveDateTime>,
    date_to: Option<NaiveDateTime>,
    min_amount: Option<String>,
    address_needle: String,
    asset_needle: String,
    watch_only: WatchOnlyFilter,
    sort_column: SortColumn,
    sort_ascending: bool,
}

impl Default for CandyFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl CandyFilter {
    pub fn new() -> Self {
        Self {
            date_from: None,
            date_to: None,
            min_amount: None,
            address_needle: String::new(),
            asset_needle: String::new(),
            watch_only: WatchOnlyFilter::All,
            // Newest states first, matching the initial view ordering
            sort_column: SortColumn::Status,
            sort_ascending: false,
        }
    }

    pub fn set_date_bounds(
        &mut self,
        from: Option<NaiveDateTime>,
        to: Option<NaiveDateTime>,
    ) {
        self.date_from = from;
        self.date_to = to;
    }

    pub fn date_bounds(&self) -> (Option<NaiveDateTime>, Option<NaiveDateTime>) {
        (self.date_from, self.date_to)
    }

    /// Set the minimum-amount threshold as typed. An empty string clears it.
    pub fn set_min_amount_str(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text.trim().is_empty() {
            self.min_amount = None;
        } else {
            self.min_amount = Some(text);
        }
    }

    pub fn min_amount_str(&self) -> Option<&str> {
        self.min_amount.as_deref()
    }

    pub fn set_address_needle(&mut self, needle: impl Into<String>) {
        self.address_needle = needle.into();
    }

    pub fn set_asset_needle(&mut self, needle: impl Into<String>) {
        self.asset_needle = needle.into();
    }

    pub fn set_watch_only(&mut self, mode: WatchOnlyFilter) {
        self.watch_only = mode;
    }

    pub fn watch_only(&self) -> WatchOnlyFilter {
        self.watch_only
    }

    /// Toggle sorting: a repeated column flips direction, a new column sorts
    /// ascending.
    pub fn toggle_sort(&mut self, column: SortColumn) {
        if self.sort_column == column {
            self.sort_ascending = !self.sort_ascending;
        } else {
            self.sort_column = column;
            self.sort_ascending = true;
        }
    }

    pub fn sort(&self) -> (SortColumn, bool) {
        (self.sort_column, self.sort_ascending)
    }

    /// Whether a record passes every active filter parameter.
    pub fn matches(&self, record: &CandyRecord) -> bool {
        let time = record.time.naive_local();
        if let Some(from) = self.date_from {
            if time < from {
                return false;
            }
        }
        if let Some(to) = self.date_to {
            if time >= to {
                return false;
            }
        }

        if !self.watch_only.matches(record.watch_only) {
            return false;
        }

        if !self.asset_needle.is_empty() {
            let needle = self.asset_needle.to_lowercase();
            if !record.asset_name.to_lowercase().contains(&needle) {
                return false;
            }
        }

        if !self.address_needle.is_empty() {
            let needle = self.address_needle.to_lowercase();
            if !record.address.to_lowercase().contains(&needle)
                && !record.label.to_lowercase().contains(&needle)
            {
                return false;
            }
        }

        if let Some(min) = &self.min_amount {
            // The threshold string is re-parsed against each row's own
            // precision; unparseable input leaves the row visible.
            if let Some(min_units) = amounts::parse_amount_lossy(min, record.decimals) {
                if record.amount.unsigned_abs() < min_units as u64 {
                    return false;
                }
            }
        }

        true
    }

    /// Materialize the visible rows as source-model indices, filtered and
    /// sorted per the current parameters.
    pub fn view_rows(&self, model: &CandyTableModel) -> Vec<usize> {
        let records = model.records();
        let mut rows: Vec<usize> = records
            .iter()
            .enumerate()
            .filter(|(_, r)| self.matches(r))
            .map(|(i, _)| i)
            .collect();

        rows.sort_by(|&a, &b| {
            let ra = &records[a];
            let rb = &records[b];
            let ordering = match self.sort_column {
                SortColumn::Status => ra.status.sort_key().cmp(&rb.status.sort_key()),
                SortColumn::WatchOnly => ra.watch_only.cmp(&rb.watch_only),
                SortColumn::Date => ra.time.cmp(&rb.time),
                SortColumn::AssetName => ra
                    .asset_name
                    .to_lowercase()
                    .cmp(&rb.asset_name.to_lowercase()),
                SortColumn::Address => ra.address.cmp(&rb.address),
                SortColumn::Amount => ra.amount.cmp(&rb.amount),
            };
            if self.sort_ascending {
                ordering
            } else {
                ordering.reverse()
            }
        });

        rows
    }

    /// Map a source-model row to its position in the current view, if it is
    /// visible at all.
    pub fn view_position_of(
        &self,
        model: &CandyTableModel,
        source_index: usize,
    ) -> Option<usize> {
        self.view_rows(model)
            .iter()
            .position(|&ix| ix == source_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CandyStatus, TxHash};
    use chrono::{Local, TimeZone, Weekday};

    fn record_at(
        asset: &str,
        amount: i64,
        decimals: u8,
        y: i32,
        m: u32,
        d: u32,
        h: u32,
    ) -> CandyRecord {
        CandyRecord {
            txid: TxHash::new([d as u8; 32]),
            output_index: h,
            time: Local.with_ymd_and_hms(y, m, d, h, 0, 0).single().unwrap(),
            status: CandyStatus::Confirmed,
            watch_only: false,
            asset_name: asset.to_string(),
            address: format!("X{}addr", asset.to_lowercase()),
            label: String::new(),
            amount,
            decimals,
            unit: asset.to_string(),
            raw_hex: String::new(),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // ==================== preset index tests ====================

    #[test]
    fn test_preset_index_round_trip() {
        for preset in DateFilterPreset::ALL {
            assert_eq!(DateFilterPreset::from_index(preset.index()), Some(preset));
        }
        assert_eq!(DateFilterPreset::from_index(99), None);
    }

    #[test]
    fn test_preset_indices_are_positional() {
        assert_eq!(DateFilterPreset::All.index(), 0);
        assert_eq!(DateFilterPreset::Range.index(), 6);
    }

    // ==================== preset_bounds tests ====================

    #[test]
    fn test_preset_bounds_all_is_unbounded() {
        assert_eq!(
            preset_bounds(DateFilterPreset::All, date(2026, 8, 21)),
            (None, None)
        );
    }

    #[test]
    fn test_preset_bounds_today() {
        let (from, to) = preset_bounds(DateFilterPreset::Today, date(2026, 8, 21));
        assert_eq!(from, Some(day_start(date(2026, 8, 21))));
        assert_eq!(to, None);
    }

    #[test]
    fn test_preset_bounds_this_week_starts_monday() {
        // Pick a Friday via the ISO week so the expected Monday is exact
        let friday = NaiveDate::from_isoywd_opt(2026, 30, Weekday::Fri).unwrap();
        let monday = NaiveDate::from_isoywd_opt(2026, 30, Weekday::Mon).unwrap();

        let (from, to) = preset_bounds(DateFilterPreset::ThisWeek, friday);

        assert_eq!(from, Some(day_start(monday)));
        assert_eq!(to, None);
    }

    #[test]
    fn test_preset_bounds_this_week_on_monday_is_same_day() {
        let monday = NaiveDate::from_isoywd_opt(2026, 30, Weekday::Mon).unwrap();
        let (from, _) = preset_bounds(DateFilterPreset::ThisWeek, monday);
        assert_eq!(from, Some(day_start(monday)));
    }

    #[test]
    fn test_preset_bounds_this_month() {
        let (from, to) = preset_bounds(DateFilterPreset::ThisMonth, date(2026, 8, 21));
        assert_eq!(from, Some(day_start(date(2026, 8, 1))));
        assert_eq!(to, None);
    }

    #[test]
    fn test_preset_bounds_last_month_spans_exactly_one_month() {
        let (from, to) = preset_bounds(DateFilterPreset::LastMonth, date(2026, 8, 21));
        assert_eq!(from, Some(day_start(date(2026, 7, 1))));
        assert_eq!(to, Some(day_start(date(2026, 8, 1))));
    }

    #[test]
    fn test_preset_bounds_last_month_in_january_wraps_year() {
        let (from, to) = preset_bounds(DateFilterPreset::LastMonth, date(2026, 1, 15));
        assert_eq!(from, Some(day_start(date(2025, 12, 1))));
        assert_eq!(to, Some(day_start(date(2026, 1, 1))));
    }

    #[test]
    fn test_preset_bounds_this_year() {
        let (from, to) = preset_bounds(DateFilterPreset::ThisYear, date(2026, 8, 21));
        assert_eq!(from, Some(day_start(date(2026, 1, 1))));
        assert_eq!(to, None);
    }

    // ==================== range_bounds tests ====================

    #[test]
    fn test_range_bounds_include_both_picked_days() {
        let (from, to) = range_bounds(date(2026, 1, 1), date(2026, 1, 31));
        assert_eq!(from, Some(day_start(date(2026, 1, 1))));
        // Upper bound is exclusive midnight after the last picked day
        assert_eq!(to, Some(day_start(date(2026, 2, 1))));
    }

    #[test]
    fn test_range_bounds_single_day() {
        let (from, to) = range_bounds(date(2026, 5, 5), date(2026, 5, 5));
        assert_eq!(from, Some(day_start(date(2026, 5, 5))));
        assert_eq!(to, Some(day_start(date(2026, 5, 6))));
    }

    // ==================== normalize_amount_input tests ====================

    #[test]
    fn test_normalize_amount_input_strips_one_trailing_dot() {
        assert_eq!(normalize_amount_input("12."), "12");
    }

    #[test]
    fn test_normalize_amount_input_leaves_other_input_alone() {
        assert_eq!(normalize_amount_input("12"), "12");
        assert_eq!(normalize_amount_input("12.5"), "12.5");
        assert_eq!(normalize_amount_input(""), "");
    }

    // ==================== matches tests ====================

    #[test]
    fn test_matches_date_bounds_are_half_open() {
        let mut filter = CandyFilter::new();
        filter.set_date_bounds(
            Some(day_start(date(2026, 8, 1))),
            Some(day_start(date(2026, 8, 2))),
        );

        let inside = record_at("CANDY", 100, 2, 2026, 8, 1, 15);
        let at_upper_bound = record_at("CANDY", 100, 2, 2026, 8, 2, 0);
        let before = record_at("CANDY", 100, 2, 2026, 7, 31, 23);

        assert!(filter.matches(&inside));
        assert!(!filter.matches(&at_upper_bound));
        assert!(!filter.matches(&before));
    }

    #[test]
    fn test_matches_watch_only_modes() {
        let mut watched = record_at("CANDY", 100, 2, 2026, 8, 1, 10);
        watched.watch_only = true;
        let owned = record_at("CANDY", 100, 2, 2026, 8, 1, 11);

        let mut filter = CandyFilter::new();
        filter.set_watch_only(WatchOnlyFilter::Yes);
        assert!(filter.matches(&watched));
        assert!(!filter.matches(&owned));

        filter.set_watch_only(WatchOnlyFilter::No);
        assert!(!filter.matches(&watched));
        assert!(filter.matches(&owned));
    }

    #[test]
    fn test_matches_asset_needle_is_case_insensitive_substring() {
        let record = record_at("CandyGold", 100, 2, 2026, 8, 1, 10);

        let mut filter = CandyFilter::new();
        filter.set_asset_needle("gold");
        assert!(filter.matches(&record));

        filter.set_asset_needle("silver");
        assert!(!filter.matches(&record));
    }

    #[test]
    fn test_matches_address_needle_searches_address_and_label() {
        let mut record = record_at("CANDY", 100, 2, 2026, 8, 1, 10);
        record.address = "Xq3r7candyaddr".to_string();
        record.label = "Airdrop round 2".to_string();

        let mut filter = CandyFilter::new();
        filter.set_address_needle("q3r7");
        assert!(filter.matches(&record));

        filter.set_address_needle("round 2");
        assert!(filter.matches(&record));

        filter.set_address_needle("missing");
        assert!(!filter.matches(&record));
    }

    #[test]
    fn test_matches_min_amount_respects_row_precision() {
        // "1.5" against a 2-decimal row means 150 raw units
        let mut filter = CandyFilter::new();
        filter.set_min_amount_str("1.5");

        let passing = record_at("CANDY", 150, 2, 2026, 8, 1, 10);
        let failing = record_at("CANDY", 149, 2, 2026, 8, 1, 11);

        assert!(filter.matches(&passing));
        assert!(!filter.matches(&failing));
    }

    #[test]
    fn test_matches_min_amount_uses_magnitude_for_negative_rows() {
        let mut filter = CandyFilter::new();
        filter.set_min_amount_str("1");

        let corrective = record_at("CANDY", -250, 2, 2026, 8, 1, 10);
        assert!(filter.matches(&corrective));
    }

    #[test]
    fn test_matches_unparseable_min_amount_is_ignored() {
        let mut filter = CandyFilter::new();
        filter.set_min_amount_str("garbage");

        let record = record_at("CANDY", 1, 2, 2026, 8, 1, 10);
        assert!(filter.matches(&record));
    }

    #[test]
    fn test_set_min_amount_str_empty_clears_threshold() {
        let mut filter = CandyFilter::new();
        filter.set_min_amount_str("12");
        assert_eq!(filter.min_amount_str(), Some("12"));

        filter.set_min_amount_str("");
        assert_eq!(filter.min_amount_str(), None);
    }

    // ==================== view_rows tests ====================

    #[test]
    fn test_view_rows_filters_and_sorts() {
        let model = CandyTableModel::new(vec![
            record_at("CANDY", 100, 2, 2026, 8, 1, 10),
            record_at("SUGAR", 200, 2, 2026, 8, 2, 10),
            record_at("CANDY", 300, 2, 2026, 8, 3, 10),
        ]);

        let mut filter = CandyFilter::new();
        filter.set_asset_needle("CANDY");
        filter.toggle_sort(SortColumn::Date);
        filter.toggle_sort(SortColumn::Date); // descending

        assert_eq!(filter.view_rows(&model), vec![2, 0]);
    }

    #[test]
    fn test_toggle_sort_flips_direction_then_switches_column() {
        let mut filter = CandyFilter::new();

        filter.toggle_sort(SortColumn::Amount);
        assert_eq!(filter.sort(), (SortColumn::Amount, true));

        filter.toggle_sort(SortColumn::Amount);
        assert_eq!(filter.sort(), (SortColumn::Amount, false));

        filter.toggle_sort(SortColumn::Date);
        assert_eq!(filter.sort(), (SortColumn::Date, true));
    }

    #[test]
    fn test_view_position_of_maps_source_to_view() {
        let model = CandyTableModel::new(vec![
            record_at("CANDY", 100, 2, 2026, 8, 1, 10),
            record_at("SUGAR", 200, 2, 2026, 8, 2, 10),
            record_at("CANDY", 300, 2, 2026, 8, 3, 10),
        ]);

        let mut filter = CandyFilter::new();
        filter.set_asset_needle("CANDY");
        filter.toggle_sort(SortColumn::Date); // ascending

        assert_eq!(filter.view_position_of(&model, 0), Some(0));
        assert_eq!(filter.view_position_of(&model, 2), Some(1));
        // Filtered-out rows map to nothing
        assert_eq!(filter.view_position_of(&model, 1), None);
    }
}
