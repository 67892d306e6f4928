//! Datepicker page parser

use once_cell::sync::Lazy;
use regex::Regex;
use slotwatch_domain::{Result, SlotId, SlotSet, SlotWatchError};

static CELL_TAG: Lazy<std::result::Result<Regex, regex::Error>> =
    Lazy::new(|| Regex::new(r"(?is)<td\b([^>]*)>"));

static HEADER_TAG: Lazy<std::result::Result<Regex, regex::Error>> =
    Lazy::new(|| Regex::new(r"(?is)<th\b([^>]*)>"));

static ATTRIBUTE: Lazy<std::result::Result<Regex, regex::Error>> = Lazy::new(|| {
    Regex::new(r#"(?is)([a-z][a-z0-9_:-]*)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#)
});

fn pattern(cell: &'static Lazy<std::result::Result<Regex, regex::Error>>) -> Result<&'static Regex> {
    Lazy::force(cell)
        .as_ref()
        .map_err(|err| SlotWatchError::Internal(format!("invalid page pattern: {err}")))
}

/// What one rendered month offers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CalendarPage {
    /// Open days on this page.
    pub slots: SlotSet,
    /// Whether the datepicker can advance past this page.
    pub has_next: bool,
}

/// Parse one datepicker page.
///
/// Cells whose class list lacks `day` or includes `disabled` are ignored, as
/// are enabled days without a `data-date`. A page with no `next` control, or
/// a disabled one, is the last page.
///
/// A page without any datepicker markup, or an enabled day whose `data-date`
/// is not a representable epoch-millisecond integer, is an `Observation`
/// error.
pub fn parse_page(html: &str) -> Result<CalendarPage> {
    let cell_tag = pattern(&CELL_TAG)?;
    let header_tag = pattern(&HEADER_TAG)?;
    let attribute = pattern(&ATTRIBUTE)?;

    let mut slots = SlotSet::new();
    let mut day_cells = 0usize;
    for cell in cell_tag.captures_iter(html) {
        let attrs = cell.get(1).map_or("", |m| m.as_str());
        let classes = attr_value(attribute, attrs, "class").unwrap_or_default();
        if !has_class(&classes, "day") {
            continue;
        }
        day_cells += 1;
        if has_class(&classes, "disabled") {
            continue;
        }

        let Some(raw) = attr_value(attribute, attrs, "data-date") else {
            tracing::debug!("calendar.cell_date_missing");
            continue;
        };
        slots.insert(parse_cell_date(&raw)?);
    }

    let next_classes = header_tag
        .captures_iter(html)
        .filter_map(|header| {
            let attrs = header.get(1).map_or("", |m| m.as_str());
            attr_value(attribute, attrs, "class")
        })
        .find(|classes| has_class(classes, "next"));

    if day_cells == 0 && next_classes.is_none() {
        return Err(SlotWatchError::Observation(
            "page carries no datepicker (no day cells, no next control)".to_string(),
        ));
    }

    let has_next = next_classes.is_some_and(|classes| !has_class(&classes, "disabled"));
    Ok(CalendarPage { slots, has_next })
}

fn parse_cell_date(raw: &str) -> Result<SlotId> {
    let key = raw.trim().parse::<i64>().map_err(|_| {
        SlotWatchError::Observation(format!("invalid data-date {raw:?} on an open day"))
    })?;
    SlotId::try_from_millis(key).ok_or_else(|| {
        SlotWatchError::Observation(format!("data-date {key} is outside the calendar range"))
    })
}

fn attr_value(attribute: &Regex, attrs: &str, name: &str) -> Option<String> {
    attribute.captures_iter(attrs).find_map(|caps| {
        let key = caps.get(1)?.as_str();
        if !key.eq_ignore_ascii_case(name) {
            return None;
        }
        caps.get(2)
            .or_else(|| caps.get(3))
            .or_else(|| caps.get(4))
            .map(|m| m.as_str().to_string())
    })
}

fn has_class(classes: &str, name: &str) -> bool {
    classes.split_whitespace().any(|class| class == name)
}
