//! Shared fixtures for infra integration tests
#![allow(dead_code)]

/// Render one datepicker month with the given open-day keys.
pub fn month_page(open_days: &[i64], next_enabled: bool) -> String {
    let next_class = if next_enabled { "next" } else { "next disabled" };
    let cells: String = open_days
        .iter()
        .map(|key| format!(r#"<td class="day" data-date="{key}">x</td>"#))
        .collect();

    format!(
        r#"<div class="datepicker-days">
  <table class="table-condensed">
    <thead><tr>
      <th class="prev">&laquo;</th>
      <th colspan="5" class="datepicker-switch">month</th>
      <th class="{next_class}">&raquo;</th>
    </tr></thead>
    <tbody><tr>
      <td class="old day disabled" data-date="1000">1</td>
      {cells}
    </tr></tbody>
  </table>
</div>"#
    )
}

/// 2025-09-03T00:00:00Z
pub const SEPT_3: i64 = 1_756_857_600_000;
/// 2025-09-30T00:00:00Z
pub const SEPT_30: i64 = 1_759_190_400_000;
/// 2025-10-15T00:00:00Z
pub const OCT_15: i64 = 1_760_486_400_000;
