use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The closed set of section types the engine knows how to render.
///
/// The editor's "add section" catalog is built from [`SectionKind::ALL`];
/// persisted documents may still contain types outside this set (removed or
/// renamed in a newer deploy), which deserialize as
/// [`SectionContent::Unknown`] and are skipped at render time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionKind {
    HeroBanner,
    FeaturedProducts,
    BlogPosts,
    Testimonials,
    CtaBanner,
    Newsletter,
    VideoEmbed,
    ImageGallery,
    CountdownTimer,
    SocialFeed,
    CustomHtml,
    Spacer,
    CategoryShowcase,
    ProductGrid,
    HeroSlider,
    FeaturesList,
}

impl SectionKind {
    pub const ALL: [SectionKind; 16] = [
        SectionKind::HeroBanner,
        SectionKind::FeaturedProducts,
        SectionKind::BlogPosts,
        SectionKind::Testimonials,
        SectionKind::CtaBanner,
        SectionKind::Newsletter,
        SectionKind::VideoEmbed,
        SectionKind::ImageGallery,
        SectionKind::CountdownTimer,
        SectionKind::SocialFeed,
        SectionKind::CustomHtml,
        SectionKind::Spacer,
        SectionKind::CategoryShowcase,
        SectionKind::ProductGrid,
        SectionKind::HeroSlider,
        SectionKind::FeaturesList,
    ];

    /// Wire tag for this kind (matches the serde representation).
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKind::HeroBanner => "hero-banner",
            SectionKind::FeaturedProducts => "featured-products",
            SectionKind::BlogPosts => "blog-posts",
            SectionKind::Testimonials => "testimonials",
            SectionKind::CtaBanner => "cta-banner",
            SectionKind::Newsletter => "newsletter",
            SectionKind::VideoEmbed => "video-embed",
            SectionKind::ImageGallery => "image-gallery",
            SectionKind::CountdownTimer => "countdown-timer",
            SectionKind::SocialFeed => "social-feed",
            SectionKind::CustomHtml => "custom-html",
            SectionKind::Spacer => "spacer",
            SectionKind::CategoryShowcase => "category-showcase",
            SectionKind::ProductGrid => "product-grid",
            SectionKind::HeroSlider => "hero-slider",
            SectionKind::FeaturesList => "features-list",
        }
    }

    /// Human-readable label used as the default display name in the editor.
    pub fn display_name(&self) -> &'static str {
        match self {
            SectionKind::HeroBanner => "Hero Banner",
            SectionKind::FeaturedProducts => "Featured Products",
            SectionKind::BlogPosts => "Blog Posts",
            SectionKind::Testimonials => "Testimonials",
            SectionKind::CtaBanner => "CTA Banner",
            SectionKind::Newsletter => "Newsletter",
            SectionKind::VideoEmbed => "Video Embed",
            SectionKind::ImageGallery => "Image Gallery",
            SectionKind::CountdownTimer => "Countdown Timer",
            SectionKind::SocialFeed => "Social Feed",
            SectionKind::CustomHtml => "Custom HTML",
            SectionKind::Spacer => "Spacer",
            SectionKind::CategoryShowcase => "Category Showcase",
            SectionKind::ProductGrid => "Product Grid",
            SectionKind::HeroSlider => "Hero Slider",
            SectionKind::FeaturesList => "Features List",
        }
    }

    /// Seed content for a freshly added section of this kind.
    pub fn default_content(&self) -> SectionContent {
        match self {
            SectionKind::HeroBanner => SectionContent::HeroBanner(Default::default()),
            SectionKind::FeaturedProducts => SectionContent::FeaturedProducts(Default::default()),
            SectionKind::BlogPosts => SectionContent::BlogPosts(Default::default()),
            SectionKind::Testimonials => SectionContent::Testimonials(Default::default()),
            SectionKind::CtaBanner => SectionContent::CtaBanner(Default::default()),
            SectionKind::Newsletter => SectionContent::Newsletter(Default::default()),
            SectionKind::VideoEmbed => SectionContent::VideoEmbed(Default::default()),
            SectionKind::ImageGallery => SectionContent::ImageGallery(Default::default()),
            SectionKind::CountdownTimer => SectionContent::CountdownTimer(Default::default()),
            SectionKind::SocialFeed => SectionContent::SocialFeed(Default::default()),
            SectionKind::CustomHtml => SectionContent::CustomHtml(Default::default()),
            SectionKind::Spacer => SectionContent::Spacer(Default::default()),
            SectionKind::CategoryShowcase => SectionContent::CategoryShowcase(Default::default()),
            SectionKind::ProductGrid => SectionContent::ProductGrid(Default::default()),
            SectionKind::HeroSlider => SectionContent::HeroSlider(Default::default()),
            SectionKind::FeaturesList => SectionContent::FeaturesList(Default::default()),
        }
    }
}

impl std::fmt::Display for SectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Type-specific section content, tagged by `type` on the wire.
///
/// Every variant's payload derives `Default` and deserializes with
/// `#[serde(default)]`, so a persisted document whose content is missing
/// fields still loads; the renderer treats absent fields as absent, not as
/// errors. Unrecognized type tags fall through to `Unknown` and are skipped
/// at render time rather than failing the whole document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum SectionContent {
    HeroBanner(HeroBannerContent),
    FeaturedProducts(FeaturedProductsContent),
    BlogPosts(BlogPostsContent),
    Testimonials(TestimonialsContent),
    CtaBanner(CtaBannerContent),
    Newsletter(NewsletterContent),
    VideoEmbed(VideoEmbedContent),
    ImageGallery(ImageGalleryContent),
    CountdownTimer(CountdownTimerContent),
    SocialFeed(SocialFeedContent),
    CustomHtml(CustomHtmlContent),
    Spacer(SpacerContent),
    CategoryShowcase(CategoryShowcaseContent),
    ProductGrid(ProductGridContent),
    HeroSlider(HeroSliderContent),
    FeaturesList(FeaturesListContent),
    #[serde(untagged)]
    Unknown(Value),
}

impl SectionContent {
    /// The kind this content belongs to, or `None` for unknown types.
    pub fn kind(&self) -> Option<SectionKind> {
        Some(match self {
            SectionContent::HeroBanner(_) => SectionKind::HeroBanner,
            SectionContent::FeaturedProducts(_) => SectionKind::FeaturedProducts,
            SectionContent::BlogPosts(_) => SectionKind::BlogPosts,
            SectionContent::Testimonials(_) => SectionKind::Testimonials,
            SectionContent::CtaBanner(_) => SectionKind::CtaBanner,
            SectionContent::Newsletter(_) => SectionKind::Newsletter,
            SectionContent::VideoEmbed(_) => SectionKind::VideoEmbed,
            SectionContent::ImageGallery(_) => SectionKind::ImageGallery,
            SectionContent::CountdownTimer(_) => SectionKind::CountdownTimer,
            SectionContent::SocialFeed(_) => SectionKind::SocialFeed,
            SectionContent::CustomHtml(_) => SectionKind::CustomHtml,
            SectionContent::Spacer(_) => SectionKind::Spacer,
            SectionContent::CategoryShowcase(_) => SectionKind::CategoryShowcase,
            SectionContent::ProductGrid(_) => SectionKind::ProductGrid,
            SectionContent::HeroSlider(_) => SectionKind::HeroSlider,
            SectionContent::FeaturesList(_) => SectionKind::FeaturesList,
            SectionContent::Unknown(_) => return None,
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HeroBannerContent {
    pub heading: String,
    pub subheading: String,
    /// Required for a non-degraded render.
    pub image_url: String,
    pub cta_label: String,
    pub cta_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FeaturedProductsContent {
    pub heading: String,
    pub product_ids: Vec<String>,
    pub max_items: u32,
}

impl Default for FeaturedProductsContent {
    fn default() -> Self {
        Self {
            heading: String::new(),
            product_ids: Vec::new(),
            max_items: 8,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BlogPostsContent {
    pub heading: String,
    pub tag: String,
    pub limit: u32,
    pub show_excerpt: bool,
}

impl Default for BlogPostsContent {
    fn default() -> Self {
        Self {
            heading: String::new(),
            tag: String::new(),
            limit: 3,
            show_excerpt: true,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TestimonialsContent {
    pub heading: String,
    pub items: Vec<Testimonial>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Testimonial {
    pub quote: String,
    pub author: String,
    pub role: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CtaBannerContent {
    pub heading: String,
    pub body: String,
    pub button_label: String,
    pub button_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NewsletterContent {
    pub heading: String,
    pub placeholder_text: String,
    pub button_label: String,
}

impl Default for NewsletterContent {
    fn default() -> Self {
        Self {
            heading: String::new(),
            placeholder_text: "Your email address".to_string(),
            button_label: "Subscribe".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VideoEmbedContent {
    /// Required for a non-degraded render.
    pub video_url: String,
    pub caption: String,
    pub autoplay: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImageGalleryContent {
    pub heading: String,
    pub images: Vec<GalleryImage>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GalleryImage {
    pub url: String,
    pub alt: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CountdownTimerContent {
    pub heading: String,
    pub ends_at: Option<chrono::DateTime<chrono::Utc>>,
    pub expired_message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SocialFeedContent {
    pub platform: String,
    pub handle: String,
    pub post_count: u32,
}

impl Default for SocialFeedContent {
    fn default() -> Self {
        Self {
            platform: String::new(),
            handle: String::new(),
            post_count: 6,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CustomHtmlContent {
    pub html: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SpacerContent {
    pub height: u32,
}

impl Default for SpacerContent {
    fn default() -> Self {
        Self { height: 48 }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CategoryShowcaseContent {
    pub heading: String,
    pub category_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProductGridContent {
    pub heading: String,
    pub product_ids: Vec<String>,
    pub rows: u32,
}

impl Default for ProductGridContent {
    fn default() -> Self {
        Self {
            heading: String::new(),
            product_ids: Vec::new(),
            rows: 2,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HeroSliderContent {
    pub slides: Vec<HeroSlide>,
    pub interval_ms: u32,
}

impl Default for HeroSliderContent {
    fn default() -> Self {
        Self {
            slides: Vec::new(),
            interval_ms: 5000,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HeroSlide {
    pub heading: String,
    pub image_url: String,
    pub cta_label: String,
    pub cta_url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FeaturesListContent {
    pub heading: String,
    pub features: Vec<FeatureItem>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FeatureItem {
    pub icon: String,
    pub title: String,
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn content_round_trips_with_type_tag() {
        let content = SectionContent::HeroBanner(HeroBannerContent {
            heading: "Welcome".into(),
            image_url: "https://cdn.example.com/hero.jpg".into(),
            ..Default::default()
        });
        let value = serde_json::to_value(&content).unwrap();
        assert_eq!(value["type"], "hero-banner");
        assert_eq!(value["heading"], "Welcome");

        let back: SectionContent = serde_json::from_value(value).unwrap();
        assert_eq!(back.kind(), Some(SectionKind::HeroBanner));
    }

    #[test]
    fn missing_fields_deserialize_as_defaults() {
        let content: SectionContent =
            serde_json::from_value(json!({ "type": "featured-products" })).unwrap();
        match content {
            SectionContent::FeaturedProducts(c) => {
                assert!(c.product_ids.is_empty());
                assert_eq!(c.max_items, 8);
            }
            other => panic!("unexpected content: {other:?}"),
        }
    }

    #[test]
    fn unknown_type_tag_is_tolerated() {
        let content: SectionContent =
            serde_json::from_value(json!({ "type": "legacy-widget", "foo": 1 })).unwrap();
        assert!(matches!(content, SectionContent::Unknown(_)));
        assert_eq!(content.kind(), None);
    }

    #[test]
    fn kind_tag_matches_content_tag() {
        for kind in SectionKind::ALL {
            let content = kind.default_content();
            let value = serde_json::to_value(&content).unwrap();
            assert_eq!(value["type"], kind.as_str());
            assert_eq!(content.kind(), Some(kind));
        }
    }
}
