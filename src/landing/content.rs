//! Marketing copy for the landing page sections.

pub struct ValueProp {
    pub title: &'static str,
    pub description: &'static str,
}

pub const BRAND: &str = "Futurearc Academy";
pub const BADGE: &str = "Coming 2026";
pub const HEADLINE: &str = "Learn to build.";
pub const SUBHEADLINE: &str = "Futurearc Academy is where developers build real projects, think like engineers, and use AI the right way, together.";
pub const HERO_FOOTNOTE: &str = "Free to join. No spam, ever.";

pub const VALUES_TITLE: &str = "A different kind of learning";
pub const VALUES_INTRO: &str =
    "Built for people who want to become real developers, not just complete courses.";

pub const VALUES: [ValueProp; 4] = [
    ValueProp {
        title: "AI-driven learning paths",
        description: "Personalized curriculum that adapts to your pace and goals.",
    },
    ValueProp {
        title: "Real-world projects",
        description: "No tutorials. Build actual products from day one.",
    },
    ValueProp {
        title: "Community feedback",
        description: "Learn from peers. Review code. Iterate together.",
    },
    ValueProp {
        title: "Learn by building",
        description: "Ship features, not just complete lessons.",
    },
];

pub const EARLY_ACCESS_BADGE: &str = "Limited spots";
pub const EARLY_ACCESS_TITLE: &str = "Early access for builders";
pub const EARLY_ACCESS_INTRO: &str =
    "Join before launch and help shape the future of developer education.";
pub const EARLY_ACCESS_BENEFITS: [&str; 3] = [
    "First access before public launch",
    "Influence what gets built first",
    "Early member benefits at launch",
];

pub const FORM_TITLE: &str = "Join the waitlist";
pub const FORM_INTRO: &str = "Tell us a bit about yourself. It takes 30 seconds.";
pub const INTERESTS_PLACEHOLDER: &str =
    "e.g., Full-stack development, AI integration, building SaaS...";

pub const TRUST_LINE: &str = "Launching in 2026. Built in public.";
pub const TRUST_BODY: &str = "We're taking our time to build something meaningful. Quality over speed. Long-term thinking over quick wins.";

pub const FOOTER: &str = "© 2026 Futurearc Academy. Built in public.";
