use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::content::SectionContent;
use crate::layout::SectionLayout;
use crate::section::Section;

/// A section resolved into a renderable view-model: the type tag, the
/// wrapping layout with all padding defaults applied, and a type-specific
/// body. Consumers (templates, storefront clients) turn this into markup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedUnit {
    pub section_id: String,
    pub section_type: String,
    pub name: String,
    pub layout: SectionLayout,
    pub body: Value,
}

impl RenderedUnit {
    /// The unit a composed page falls back to when nothing is renderable.
    /// Operators must never see a blank page and assume the service broke;
    /// the message tells editors what to do and visitors what state this is.
    pub fn placeholder(is_preview: bool) -> Self {
        let message = if is_preview {
            "No sections configured — add sections using the builder."
        } else {
            "This page has no sections yet."
        };
        Self {
            section_id: String::new(),
            section_type: "placeholder".to_string(),
            name: "Placeholder".to_string(),
            layout: SectionLayout::default(),
            body: json!({ "message": message }),
        }
    }
}

/// Outcome of rendering a single section.
#[derive(Debug, Clone)]
pub enum RenderOutcome {
    Rendered(RenderedUnit),
    Skipped,
}

/// Render one section into a view-model.
///
/// Unknown section types are skipped with a warning; a removed or malformed
/// type must never abort the page. Known types render defensively: absent
/// optional fields are omitted from the body, and a missing required field
/// (a hero banner with no image) yields a visibly degraded body rather than
/// an error.
pub fn render(section: &Section, now: DateTime<Utc>, is_preview: bool) -> RenderOutcome {
    let body = match &section.content {
        SectionContent::Unknown(raw) => {
            let tag = raw
                .get("type")
                .and_then(Value::as_str)
                .unwrap_or("<untagged>");
            tracing::warn!(
                section_id = %section.id,
                section_type = %tag,
                "skipping section with unknown type"
            );
            return RenderOutcome::Skipped;
        }
        SectionContent::HeroBanner(c) => {
            let mut body = Map::new();
            put_text(&mut body, "heading", &c.heading);
            put_text(&mut body, "subheading", &c.subheading);
            put_text(&mut body, "ctaLabel", &c.cta_label);
            put_text(&mut body, "ctaUrl", &c.cta_url);
            if c.image_url.is_empty() {
                degrade(&mut body, "hero banner has no image");
            } else {
                body.insert("imageUrl".into(), json!(c.image_url));
            }
            Value::Object(body)
        }
        SectionContent::FeaturedProducts(c) => {
            let shown: Vec<&String> = c.product_ids.iter().take(c.max_items as usize).collect();
            let mut body = Map::new();
            put_text(&mut body, "heading", &c.heading);
            body.insert("productIds".into(), json!(shown));
            Value::Object(body)
        }
        SectionContent::BlogPosts(c) => {
            let mut body = Map::new();
            put_text(&mut body, "heading", &c.heading);
            put_text(&mut body, "tag", &c.tag);
            body.insert("limit".into(), json!(c.limit));
            body.insert("showExcerpt".into(), json!(c.show_excerpt));
            Value::Object(body)
        }
        SectionContent::Testimonials(c) => {
            let mut body = Map::new();
            put_text(&mut body, "heading", &c.heading);
            body.insert("items".into(), json!(c.items));
            Value::Object(body)
        }
        SectionContent::CtaBanner(c) => {
            let mut body = Map::new();
            put_text(&mut body, "heading", &c.heading);
            put_text(&mut body, "body", &c.body);
            put_text(&mut body, "buttonLabel", &c.button_label);
            put_text(&mut body, "buttonUrl", &c.button_url);
            Value::Object(body)
        }
        SectionContent::Newsletter(c) => {
            let mut body = Map::new();
            put_text(&mut body, "heading", &c.heading);
            put_text(&mut body, "placeholderText", &c.placeholder_text);
            put_text(&mut body, "buttonLabel", &c.button_label);
            Value::Object(body)
        }
        SectionContent::VideoEmbed(c) => {
            let mut body = Map::new();
            put_text(&mut body, "caption", &c.caption);
            // Autoplay stays off in the editor preview.
            body.insert("autoplay".into(), json!(c.autoplay && !is_preview));
            if c.video_url.is_empty() {
                degrade(&mut body, "video embed has no URL");
            } else {
                body.insert("videoUrl".into(), json!(c.video_url));
            }
            Value::Object(body)
        }
        SectionContent::ImageGallery(c) => {
            let mut body = Map::new();
            put_text(&mut body, "heading", &c.heading);
            body.insert("images".into(), json!(c.images));
            Value::Object(body)
        }
        SectionContent::CountdownTimer(c) => {
            let mut body = Map::new();
            put_text(&mut body, "heading", &c.heading);
            match c.ends_at {
                Some(ends_at) if ends_at > now => {
                    body.insert("endsAt".into(), json!(ends_at));
                    body.insert(
                        "remainingSeconds".into(),
                        json!((ends_at - now).num_seconds()),
                    );
                }
                Some(_) => {
                    body.insert("expired".into(), json!(true));
                    put_text(&mut body, "expiredMessage", &c.expired_message);
                }
                None => degrade(&mut body, "countdown has no end date"),
            }
            Value::Object(body)
        }
        SectionContent::SocialFeed(c) => {
            let mut body = Map::new();
            put_text(&mut body, "platform", &c.platform);
            put_text(&mut body, "handle", &c.handle);
            body.insert("postCount".into(), json!(c.post_count));
            Value::Object(body)
        }
        SectionContent::CustomHtml(c) => {
            let mut body = Map::new();
            put_text(&mut body, "html", &c.html);
            Value::Object(body)
        }
        SectionContent::Spacer(c) => json!({ "height": c.height }),
        SectionContent::CategoryShowcase(c) => {
            let mut body = Map::new();
            put_text(&mut body, "heading", &c.heading);
            body.insert("categoryIds".into(), json!(c.category_ids));
            Value::Object(body)
        }
        SectionContent::ProductGrid(c) => {
            let mut body = Map::new();
            put_text(&mut body, "heading", &c.heading);
            body.insert("productIds".into(), json!(c.product_ids));
            body.insert("rows".into(), json!(c.rows));
            Value::Object(body)
        }
        SectionContent::HeroSlider(c) => json!({
            "slides": c.slides,
            "intervalMs": c.interval_ms,
        }),
        SectionContent::FeaturesList(c) => {
            let mut body = Map::new();
            put_text(&mut body, "heading", &c.heading);
            body.insert("features".into(), json!(c.features));
            Value::Object(body)
        }
    };

    RenderOutcome::Rendered(RenderedUnit {
        section_id: section.id.clone(),
        section_type: section
            .content
            .kind()
            .map(|k| k.as_str().to_string())
            .unwrap_or_default(),
        name: section.name.clone(),
        layout: section.layout.clone(),
        body,
    })
}

fn put_text(body: &mut Map<String, Value>, key: &str, value: &str) {
    if !value.is_empty() {
        body.insert(key.to_string(), json!(value));
    }
}

fn degrade(body: &mut Map<String, Value>, reason: &str) {
    body.insert("degraded".into(), json!(true));
    body.insert("degradedReason".into(), json!(reason));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{HeroBannerContent, SectionKind};
    use serde_json::json;

    fn section(content: SectionContent) -> Section {
        Section {
            id: "s1".into(),
            name: "test".into(),
            order: 0,
            enabled: true,
            content,
            layout: SectionLayout::default(),
            visibility: None,
        }
    }

    fn rendered(outcome: RenderOutcome) -> RenderedUnit {
        match outcome {
            RenderOutcome::Rendered(unit) => unit,
            RenderOutcome::Skipped => panic!("expected a rendered unit"),
        }
    }

    #[test]
    fn unknown_type_is_skipped_not_fatal() {
        let s = section(SectionContent::Unknown(json!({ "type": "legacy-widget" })));
        assert!(matches!(
            render(&s, Utc::now(), false),
            RenderOutcome::Skipped
        ));
    }

    #[test]
    fn hero_without_image_renders_degraded() {
        let s = section(SectionContent::HeroBanner(HeroBannerContent {
            heading: "Sale".into(),
            ..Default::default()
        }));
        let unit = rendered(render(&s, Utc::now(), false));
        assert_eq!(unit.body["degraded"], true);
        assert_eq!(unit.body["heading"], "Sale");
        // Absent optional fields are omitted entirely.
        assert!(unit.body.get("subheading").is_none());
    }

    #[test]
    fn empty_text_fields_are_omitted_across_types() {
        let featured = rendered(render(
            &section(SectionContent::FeaturedProducts(Default::default())),
            Utc::now(),
            false,
        ));
        assert!(featured.body.get("heading").is_none());
        assert!(featured.body.get("productIds").is_some());

        let feed = rendered(render(
            &section(SectionContent::SocialFeed(Default::default())),
            Utc::now(),
            false,
        ));
        assert!(feed.body.get("platform").is_none());
        assert!(feed.body.get("handle").is_none());
        assert!(feed.body.get("postCount").is_some());

        let posts = rendered(render(
            &section(SectionContent::BlogPosts(Default::default())),
            Utc::now(),
            false,
        ));
        assert!(posts.body.get("heading").is_none());
        assert!(posts.body.get("tag").is_none());

        // Seeded defaults still come through.
        let newsletter = rendered(render(
            &section(SectionContent::Newsletter(Default::default())),
            Utc::now(),
            false,
        ));
        assert!(newsletter.body.get("heading").is_none());
        assert_eq!(newsletter.body["placeholderText"], "Your email address");
    }

    #[test]
    fn default_content_renders_for_every_kind() {
        for kind in SectionKind::ALL {
            let s = section(kind.default_content());
            let unit = rendered(render(&s, Utc::now(), true));
            assert_eq!(unit.section_type, kind.as_str());
        }
    }

    #[test]
    fn countdown_past_end_reports_expired() {
        let past = Utc::now() - chrono::Duration::days(1);
        let s = section(SectionContent::CountdownTimer(
            crate::content::CountdownTimerContent {
                heading: "Ends soon".into(),
                ends_at: Some(past),
                expired_message: "Offer ended".into(),
            },
        ));
        let unit = rendered(render(&s, Utc::now(), false));
        assert_eq!(unit.body["expired"], true);
        assert_eq!(unit.body["expiredMessage"], "Offer ended");
    }

    #[test]
    fn preview_disables_video_autoplay() {
        let s = section(SectionContent::VideoEmbed(
            crate::content::VideoEmbedContent {
                video_url: "https://video.example.com/v1".into(),
                caption: String::new(),
                autoplay: true,
            },
        ));
        let live = rendered(render(&s, Utc::now(), false));
        let preview = rendered(render(&s, Utc::now(), true));
        assert_eq!(live.body["autoplay"], true);
        assert_eq!(preview.body["autoplay"], false);
    }
}
