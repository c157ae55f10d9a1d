//! Server-rendered landing page.

use maud::{html, Markup, PreEscaped, DOCTYPE};

use super::content::*;
use crate::waitlist::form::{CaptureForm, Feedback};
use crate::waitlist::repo_types::ExperienceLevel;
use crate::waitlist::validation::{EMAIL_MAX_CHARS, INTERESTS_MAX_CHARS};

/// Render the full page. `feedback` is the outcome of the last submit, if
/// this render answers one.
pub fn render(form: &CaptureForm, feedback: Option<&Feedback>) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (BRAND) " | " (BADGE) }
                meta name="description" content=(SUBHEADLINE);
                style { (PreEscaped(PAGE_CSS)) }
            }
            body {
                (hero())
                (values())
                (early_access())
                (waitlist_section(form, feedback))
                (trust())
                footer class="footer" { p { (FOOTER) } }
            }
        }
    }
}

fn hero() -> Markup {
    html! {
        section class="hero" {
            span class="badge" { (BADGE) }
            h1 { (HEADLINE) }
            p class="lead" { (SUBHEADLINE) }
            a class="button" href="#waitlist" { (FORM_TITLE) }
            p class="muted small" { (HERO_FOOTNOTE) }
        }
    }
}

fn values() -> Markup {
    html! {
        section class="values" {
            h2 { (VALUES_TITLE) }
            p class="muted" { (VALUES_INTRO) }
            div class="grid" {
                @for v in &VALUES {
                    div class="card" {
                        h3 { (v.title) }
                        p class="muted" { (v.description) }
                    }
                }
            }
        }
    }
}

fn early_access() -> Markup {
    html! {
        section class="early" {
            span class="badge" { (EARLY_ACCESS_BADGE) }
            h2 { (EARLY_ACCESS_TITLE) }
            p class="muted" { (EARLY_ACCESS_INTRO) }
            ul {
                @for benefit in &EARLY_ACCESS_BENEFITS {
                    li { (benefit) }
                }
            }
        }
    }
}

fn waitlist_section(form: &CaptureForm, feedback: Option<&Feedback>) -> Markup {
    html! {
        section id="waitlist" class="waitlist" {
            @if let Some(done) = feedback.filter(|fb| matches!(fb, Feedback::Confirmed(_))) {
                div class="confirmed" role="status" {
                    h2 { (done.title()) }
                    p { (done.message()) }
                    a class="button" href="/" { "Back to the page" }
                }
            } @else {
                h2 { (FORM_TITLE) }
                p class="muted" { (FORM_INTRO) }
                @if let Some(fb) = feedback {
                    div class=(if fb.is_error() { "alert error" } else { "alert" }) role="alert" {
                        strong { (fb.title()) }
                        " "
                        (fb.message())
                    }
                }
                (signup_form(form))
            }
        }
    }
}

fn signup_form(form: &CaptureForm) -> Markup {
    html! {
        form method="post" action="/waitlist"
            onsubmit="this.querySelector('button[type=submit]').disabled = true" {
            label for="email" { "Email" }
            input id="email" name="email" type="email" placeholder="you@example.com"
                maxlength=(EMAIL_MAX_CHARS) required value=(form.email);

            fieldset {
                legend { "Experience level" }
                @for level in ExperienceLevel::ALL {
                    label class="radio" {
                        input type="radio" name="experience" value=(level.as_str())
                            checked[form.experience == level.as_str()];
                        (level.label())
                    }
                }
            }

            label for="interests" { "What do you want to learn?" }
            textarea id="interests" name="interests" maxlength=(INTERESTS_MAX_CHARS)
                placeholder=(INTERESTS_PLACEHOLDER) { (form.interests) }

            button type="submit" disabled[!form.can_submit()] { (FORM_TITLE) }
        }
    }
}

fn trust() -> Markup {
    html! {
        section class="trust" {
            p { strong { (TRUST_LINE) } }
            p class="muted" { (TRUST_BODY) }
        }
    }
}

const PAGE_CSS: &str = r#"
:root{--bg:#0b0d12;--card:#141821;--fg:#e9ecf2;--muted:#9aa3b2;--accent:#7c5cff;--danger:#ff5c7a;--border:#242a36}
*{box-sizing:border-box}
body{margin:0;font-family:system-ui,-apple-system,sans-serif;background:var(--bg);color:var(--fg);line-height:1.5}
section{max-width:960px;margin:0 auto;padding:4rem 1.5rem}
.hero{text-align:center;padding-top:6rem}
.hero h1{font-size:3rem;margin:.75rem 0}
.lead{font-size:1.15rem;color:var(--muted);max-width:620px;margin:0 auto 2rem}
.badge{display:inline-block;padding:.25rem .75rem;border:1px solid var(--border);border-radius:999px;font-size:.8rem;color:var(--accent)}
.muted{color:var(--muted)}
.small{font-size:.85rem}
.grid{display:grid;grid-template-columns:repeat(auto-fit,minmax(200px,1fr));gap:1rem;margin-top:2rem}
.card{background:var(--card);border:1px solid var(--border);border-radius:12px;padding:1.25rem}
.button,button{display:inline-block;background:var(--accent);color:#fff;border:0;border-radius:10px;padding:.75rem 1.5rem;font-size:1rem;text-decoration:none;cursor:pointer}
button:disabled{opacity:.6;cursor:progress}
.waitlist{max-width:520px}
.waitlist form{display:flex;flex-direction:column;gap:.75rem;background:var(--card);border:1px solid var(--border);border-radius:16px;padding:2rem}
input[type=email],textarea{width:100%;padding:.65rem;border-radius:8px;border:1px solid var(--border);background:var(--bg);color:var(--fg)}
textarea{min-height:100px;resize:none}
fieldset{border:0;padding:0;display:flex;gap:.75rem;flex-wrap:wrap}
legend{margin-bottom:.5rem}
.radio{border:1px solid var(--border);border-radius:8px;padding:.4rem .8rem;cursor:pointer}
.alert{border-radius:8px;padding:.75rem 1rem;margin-bottom:1rem;border:1px solid var(--border)}
.alert.error{border-color:var(--danger)}
.confirmed{text-align:center}
.trust{text-align:center}
.footer{text-align:center;color:var(--muted);font-size:.85rem;padding:2rem 0}
"#;
