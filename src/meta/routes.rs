use crate::cms::Collection;

use super::OgType;

pub const SITE_NAME: &str = "Aaitek";

/// A compiled-in metadata record. `image` is site-relative; `None` means the
/// configured default image.
pub struct StaticMeta {
    pub title: &'static str,
    pub description: &'static str,
    pub image: Option<&'static str>,
    pub og_type: OgType,
}

pub const SITE_DEFAULT: StaticMeta = StaticMeta {
    title: "Aaitek - Technology Specialists",
    description: "Aaitek helps organisations modernise with cloud, data, AI and \
                  business application solutions built by certified specialists.",
    image: None,
    og_type: OgType::Website,
};

pub static STATIC_ROUTES: &[(&str, StaticMeta)] = &[
    ("/", SITE_DEFAULT),
    (
        "/about",
        StaticMeta {
            title: "About Us - Aaitek Technology Specialists",
            description: "Meet the team behind Aaitek and learn how we deliver \
                          technology outcomes for our clients.",
            image: Some("/images/og/about.jpg"),
            og_type: OgType::Website,
        },
    ),
    (
        "/services",
        StaticMeta {
            title: "Our Services - Aaitek Technology Specialists",
            description: "Cloud, data and analytics, AI and modern workplace services \
                          from Aaitek.",
            image: Some("/images/og/services.jpg"),
            og_type: OgType::Website,
        },
    ),
    (
        "/products",
        StaticMeta {
            title: "Our Products - Aaitek Technology Specialists",
            description: "Software products and accelerators built by Aaitek.",
            image: Some("/images/og/products.jpg"),
            og_type: OgType::Website,
        },
    ),
    (
        "/case-studies",
        StaticMeta {
            title: "Case Studies - Aaitek Technology Specialists",
            description: "See how Aaitek has helped organisations transform with technology.",
            image: Some("/images/og/case-studies.jpg"),
            og_type: OgType::Website,
        },
    ),
    (
        "/articles",
        StaticMeta {
            title: "Insights - Aaitek Technology Specialists",
            description: "Articles and insights from Aaitek's technology specialists.",
            image: Some("/images/og/articles.jpg"),
            og_type: OgType::Website,
        },
    ),
    (
        "/webinars",
        StaticMeta {
            title: "Webinars - Aaitek Technology Specialists",
            description: "On-demand webinars from the Aaitek team.",
            image: Some("/images/og/webinars.jpg"),
            og_type: OgType::VideoOther,
        },
    ),
    (
        "/careers",
        StaticMeta {
            title: "Careers - Aaitek Technology Specialists",
            description: "Join Aaitek and build what's next with our clients.",
            image: None,
            og_type: OgType::Website,
        },
    ),
    (
        "/contact",
        StaticMeta {
            title: "Contact Us - Aaitek Technology Specialists",
            description: "Talk to Aaitek about your next technology project.",
            image: None,
            og_type: OgType::Website,
        },
    ),
    (
        "/privacy-policy",
        StaticMeta {
            title: "Privacy Policy - Aaitek Technology Specialists",
            description: "How Aaitek collects, uses and protects your information.",
            image: None,
            og_type: OgType::Website,
        },
    ),
];

pub fn static_route(path: &str) -> Option<&'static StaticMeta> {
    STATIC_ROUTES
        .iter()
        .find(|(route, _)| *route == path)
        .map(|(_, meta)| meta)
}

/// Detail pages whose metadata lives in the CMS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Article,
    CaseStudy,
    Service,
    Product,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Article,
        Category::CaseStudy,
        Category::Service,
        Category::Product,
    ];

    /// First path segment, e.g. `case-study` in `/case-study/:slug`.
    pub fn prefix(self) -> &'static str {
        match self {
            Category::Article => "article",
            Category::CaseStudy => "case-study",
            Category::Service => "services",
            Category::Product => "products",
        }
    }

    pub fn collection(self) -> Collection {
        match self {
            Category::Article => Collection::Articles,
            Category::CaseStudy => Collection::CaseStudies,
            Category::Service => Collection::Services,
            Category::Product => Collection::Products,
        }
    }

    pub fn og_type(self) -> OgType {
        match self {
            Category::Article | Category::CaseStudy => OgType::Article,
            Category::Service | Category::Product => OgType::Website,
        }
    }

    pub fn fallback(self) -> StaticMeta {
        let (title, description) = match self {
            Category::Article => (
                "Article - Aaitek Technology Specialists",
                "Insights and articles from Aaitek's technology specialists.",
            ),
            Category::CaseStudy => (
                "Case Study - Aaitek Technology Specialists",
                "Discover how Aaitek delivered results for our clients.",
            ),
            Category::Service => (
                "Services - Aaitek Technology Specialists",
                "Explore the technology services Aaitek provides.",
            ),
            Category::Product => (
                "Products - Aaitek Technology Specialists",
                "Explore software products built by Aaitek.",
            ),
        };
        StaticMeta {
            title,
            description,
            image: None,
            og_type: self.og_type(),
        }
    }
}
