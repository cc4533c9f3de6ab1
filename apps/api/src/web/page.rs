//! Server-rendered form page.

use std::fmt::Write;

use crate::models::profile::{
    FitnessProfile, Gender, MIN_AGE, MIN_DURATION_DAYS, MIN_MEASUREMENT,
};

pub const PAGE_TITLE: &str = "AI Fitness Trainer";
const TAGLINE: &str = "Get personalized workout and nutrition advice from an AI.";

/// Everything the page shows for one render.
pub struct PageView<'a> {
    pub profile: &'a FitnessProfile,
    pub advice: Option<&'a str>,
    pub message: Option<&'a str>,
}

pub fn render_page(view: &PageView<'_>) -> String {
    let mut html = String::with_capacity(4096);
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(html, "<title>{PAGE_TITLE}</title>");
    html.push_str(STYLE);
    html.push_str("</head>\n<body>\n<main>\n");
    let _ = writeln!(html, "<h1>{PAGE_TITLE}</h1>\n<p>{TAGLINE}</p>");

    render_form(&mut html, view.profile);

    if let Some(message) = view.message {
        let _ = writeln!(html, "<p class=\"notice\">{}</p>", escape_html(message));
    }

    if let Some(advice) = view.advice {
        let _ = writeln!(
            html,
            "<section class=\"advice\">\n<pre>{}</pre>\n</section>",
            escape_html(advice)
        );
        html.push_str(
            "<form method=\"post\" action=\"/pdf\">\n\
             <button type=\"submit\">Generate PDF</button>\n</form>\n",
        );
    }

    html.push_str(
        "<form method=\"post\" action=\"/reset\">\n\
         <button type=\"submit\">Start over</button>\n</form>\n",
    );

    html.push_str("</main>\n</body>\n</html>\n");
    html
}

fn render_form(html: &mut String, profile: &FitnessProfile) {
    html.push_str("<form method=\"post\" action=\"/advice\">\n");
    text_input(html, "name", "Enter your Name:", &profile.name);
    number_input(
        html,
        "age",
        "Enter your Age:",
        &profile.age.to_string(),
        &MIN_AGE.to_string(),
        "1",
    );
    gender_select(html, profile.gender);
    let min = format!("{MIN_MEASUREMENT:.1}");
    number_input(
        html,
        "weight_kg",
        "Enter your Weight (KG):",
        &profile.weight_kg.to_string(),
        &min,
        "0.1",
    );
    number_input(
        html,
        "height_cm",
        "Enter your Height (CM):",
        &profile.height_cm.to_string(),
        &min,
        "0.1",
    );
    number_input(
        html,
        "target_weight_kg",
        "Enter your Target Weight (KG):",
        &profile.target_weight_kg.to_string(),
        &min,
        "0.1",
    );
    number_input(
        html,
        "target_duration_days",
        "Enter your Target Duration (Days):",
        &profile.target_duration_days.to_string(),
        &MIN_DURATION_DAYS.to_string(),
        "1",
    );
    text_input(
        html,
        "food_preference",
        "Enter your Food Preference:",
        &profile.food_preference,
    );
    html.push_str("<button type=\"submit\">Get Advice</button>\n</form>\n");
}

fn text_input(html: &mut String, name: &str, label: &str, value: &str) {
    let _ = writeln!(
        html,
        "<label>{label}<input type=\"text\" name=\"{name}\" value=\"{}\"></label>",
        escape_html(value)
    );
}

fn number_input(html: &mut String, name: &str, label: &str, value: &str, min: &str, step: &str) {
    let _ = writeln!(
        html,
        "<label>{label}<input type=\"number\" name=\"{name}\" value=\"{value}\" \
         min=\"{min}\" step=\"{step}\" required></label>"
    );
}

fn gender_select(html: &mut String, selected: Gender) {
    html.push_str("<label>Enter your Gender:<select name=\"gender\">");
    for gender in Gender::ALL {
        let marker = if gender == selected { " selected" } else { "" };
        let _ = write!(html, "<option value=\"{gender}\"{marker}>{gender}</option>");
    }
    html.push_str("</select></label>\n");
}

/// Escapes text for HTML element content and double-quoted attributes.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

const STYLE: &str = "<style>\n\
body { font-family: sans-serif; background: #fafafa; }\n\
main { max-width: 44rem; margin: 2rem auto; }\n\
label { display: block; margin: 0.6rem 0; }\n\
input, select { display: block; width: 100%; padding: 0.3rem; }\n\
button { margin: 0.8rem 0; padding: 0.4rem 1rem; }\n\
.notice { color: #a15c00; }\n\
.advice pre { white-space: pre-wrap; background: #fff; padding: 1rem; border: 1px solid #ddd; }\n\
</style>\n";
