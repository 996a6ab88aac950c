use serde::{Deserialize, Serialize};

/// Column the stats table falls back to when no other sort is active.
pub const DEFAULT_SORT_COLUMN: &str = "expected_points";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    /// Anything other than `asc` sorts descending, matching the server.
    pub fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("asc") {
            Self::Asc
        } else {
            Self::Desc
        }
    }
}

/// Active sort column and direction of the stats table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub column: String,
    pub order: SortOrder,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            column: DEFAULT_SORT_COLUMN.to_string(),
            order: SortOrder::Desc,
        }
    }
}

impl SortState {
    pub fn new(column: impl Into<String>, order: SortOrder) -> Self {
        Self {
            column: column.into(),
            order,
        }
    }

    /// Sort that results from clicking the header of `column` while `self` is active.
    ///
    /// A column other than the active one starts descending. The active column
    /// goes desc -> asc, and a third click resets to the default sort.
    pub fn next_for(&self, column: &str) -> SortState {
        if self.column != column {
            return SortState::new(column, SortOrder::Desc);
        }
        match self.order {
            SortOrder::Desc => SortState::new(column, SortOrder::Asc),
            SortOrder::Asc => SortState::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_SORT_COLUMN, SortOrder, SortState};

    #[test]
    fn other_column_always_starts_descending() {
        let active = SortState::new("now_cost", SortOrder::Asc);
        assert_eq!(
            active.next_for("actual_points"),
            SortState::new("actual_points", SortOrder::Desc)
        );

        let active = SortState::new("now_cost", SortOrder::Desc);
        assert_eq!(
            active.next_for("team_name"),
            SortState::new("team_name", SortOrder::Desc)
        );
    }

    #[test]
    fn active_column_cycles_desc_asc_then_resets() {
        let first = SortState::new("now_cost", SortOrder::Desc);
        let second = first.next_for("now_cost");
        assert_eq!(second, SortState::new("now_cost", SortOrder::Asc));

        let third = second.next_for("now_cost");
        assert_eq!(third, SortState::new(DEFAULT_SORT_COLUMN, SortOrder::Desc));
    }

    #[test]
    fn default_column_ascending_resets_to_descending() {
        let active = SortState::new(DEFAULT_SORT_COLUMN, SortOrder::Asc);
        assert_eq!(active.next_for(DEFAULT_SORT_COLUMN), SortState::default());
    }

    #[test]
    fn order_parse_is_lenient() {
        assert_eq!(SortOrder::parse("asc"), SortOrder::Asc);
        assert_eq!(SortOrder::parse(" ASC "), SortOrder::Asc);
        assert_eq!(SortOrder::parse("desc"), SortOrder::Desc);
        assert_eq!(SortOrder::parse("sideways"), SortOrder::Desc);
        assert_eq!(SortOrder::parse(""), SortOrder::Desc);
    }
}
