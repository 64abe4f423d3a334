use chrono::{DateTime, Utc};

use crate::render::{render, RenderOutcome, RenderedUnit};
use crate::section::Section;
use crate::visibility::is_visible;

/// Compose a configuration's sections into an ordered list of view-models.
///
/// Pipeline: keep enabled sections, keep sections visible at `now`, sort by
/// the explicit `order` field (stable, so ties keep their array position),
/// render each, and drop skips. An empty result yields a single placeholder
/// unit instead of an empty page.
///
/// No error escapes this function: a single bad section is dropped with a
/// warning and its siblings still render.
pub fn compose(sections: &[Section], now: DateTime<Utc>, is_preview: bool) -> Vec<RenderedUnit> {
    let mut candidates: Vec<&Section> = sections
        .iter()
        .filter(|s| s.enabled)
        .filter(|s| is_visible(s, now))
        .collect();
    candidates.sort_by_key(|s| s.order);

    let units: Vec<RenderedUnit> = candidates
        .iter()
        .filter_map(|s| match render(s, now, is_preview) {
            RenderOutcome::Rendered(unit) => Some(unit),
            RenderOutcome::Skipped => None,
        })
        .collect();

    if units.is_empty() {
        tracing::debug!(is_preview, "composed page is empty, emitting placeholder");
        return vec![RenderedUnit::placeholder(is_preview)];
    }
    units
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{SectionContent, SectionKind};
    use crate::layout::SectionLayout;
    use crate::visibility::VisibilityWindow;
    use serde_json::json;

    fn section(id: &str, order: i32, enabled: bool) -> Section {
        Section {
            id: id.into(),
            name: id.to_uppercase(),
            order,
            enabled,
            content: SectionKind::Spacer.default_content(),
            layout: SectionLayout::default(),
            visibility: None,
        }
    }

    #[test]
    fn disabled_sections_are_omitted_and_order_is_respected() {
        let sections = vec![
            section("a", 0, true),
            section("b", 1, false),
            section("c", 2, true),
        ];
        let units = compose(&sections, Utc::now(), false);
        let ids: Vec<&str> = units.iter().map(|u| u.section_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn sort_is_by_order_field_not_array_position() {
        let sections = vec![
            section("late", 5, true),
            section("early", 1, true),
            section("mid", 3, true),
        ];
        let units = compose(&sections, Utc::now(), false);
        let ids: Vec<&str> = units.iter().map(|u| u.section_id.as_str()).collect();
        assert_eq!(ids, vec!["early", "mid", "late"]);
    }

    #[test]
    fn order_ties_keep_array_position() {
        let sections = vec![
            section("first", 0, true),
            section("second", 0, true),
            section("third", 0, true),
        ];
        let units = compose(&sections, Utc::now(), false);
        let ids: Vec<&str> = units.iter().map(|u| u.section_id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second", "third"]);
    }

    #[test]
    fn unknown_type_among_valid_sections_drops_only_itself() {
        let mut sections = vec![
            section("a", 0, true),
            section("b", 1, true),
            section("c", 2, true),
        ];
        sections.insert(
            1,
            Section {
                content: SectionContent::Unknown(json!({ "type": "legacy-widget" })),
                ..section("x", 1, true)
            },
        );
        let units = compose(&sections, Utc::now(), false);
        assert_eq!(units.len(), 3);
        assert!(units.iter().all(|u| u.section_type == "spacer"));
    }

    #[test]
    fn expired_sections_are_filtered_out() {
        let mut past = section("past", 0, true);
        past.visibility = Some(VisibilityWindow {
            end_date: Some(Utc::now() - chrono::Duration::days(1)),
            ..Default::default()
        });
        let sections = vec![past, section("current", 1, true)];
        let units = compose(&sections, Utc::now(), false);
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].section_id, "current");
    }

    #[test]
    fn empty_page_yields_placeholder_with_mode_specific_message() {
        let live = compose(&[], Utc::now(), false);
        assert_eq!(live.len(), 1);
        assert_eq!(live[0].section_type, "placeholder");
        assert_eq!(live[0].body["message"], "This page has no sections yet.");

        let preview = compose(&[], Utc::now(), true);
        assert_eq!(
            preview[0].body["message"],
            "No sections configured — add sections using the builder."
        );
    }

    #[test]
    fn all_disabled_also_yields_placeholder() {
        let sections = vec![section("a", 0, false)];
        let units = compose(&sections, Utc::now(), false);
        assert_eq!(units[0].section_type, "placeholder");
    }
}
