//! Server-rendered prediction form

use std::fmt::Write;

use serde::Deserialize;

use boxoffice_core::{parse_number, Catalog, Enumeration, PredictionRequest};

pub const TITLE: &str = "Movie Revenue Predictor";

pub const DESCRIPTION: &str = "An end-to-end machine learning project to predict the worldwide \
box office revenue of a movie. Enter the details and click 'Submit' to see the prediction.";

pub const RELEASE_YEAR_MIN: u32 = 1980;
pub const RELEASE_YEAR_MAX: u32 = 2025;

/// Field values as submitted by the browser
///
/// Kept as text so the page can echo back exactly what the user typed.
/// Fields left out of a submission deserialize as empty, i.e. missing.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FormValues {
    pub budget: String,
    pub popularity: String,
    pub runtime: String,
    pub release_year: String,
    pub genre: String,
    pub actor: String,
    pub director: String,
}

impl FormValues {
    /// Values the form shows on first load
    pub fn initial(catalog: &Catalog) -> Self {
        Self {
            budget: "100000000".to_string(),
            popularity: "150.0".to_string(),
            runtime: "120".to_string(),
            release_year: "2015".to_string(),
            genre: catalog.genres.default.to_string(),
            actor: catalog.actors.default.to_string(),
            director: catalog.directors.default.to_string(),
        }
    }

    /// Convert to a prediction request; blank or unparsable numbers become missing
    pub fn to_request(&self) -> PredictionRequest {
        let text = |s: &str| (!s.is_empty()).then(|| s.to_string());
        PredictionRequest {
            budget: parse_number(&self.budget),
            popularity: parse_number(&self.popularity),
            runtime: parse_number(&self.runtime),
            release_year: parse_number(&self.release_year),
            genre: text(&self.genre),
            actor: text(&self.actor),
            director: text(&self.director),
        }
    }
}

/// Escape text for HTML element content and quoted attributes
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn number_input(out: &mut String, name: &str, label: &str, value: &str) {
    let _ = write!(
        out,
        r#"<label for="{name}">{label}</label>
<input type="number" step="any" id="{name}" name="{name}" value="{value}">
"#,
        name = name,
        label = escape_html(label),
        value = escape_html(value),
    );
}

fn year_input(out: &mut String, value: &str) {
    let _ = write!(
        out,
        r#"<label for="release_year">Release Year <output id="release_year_value">{value}</output></label>
<input type="range" id="release_year" name="release_year" min="{min}" max="{max}" step="1" value="{value}"
  oninput="document.getElementById('release_year_value').value = this.value">
"#,
        value = escape_html(value),
        min = RELEASE_YEAR_MIN,
        max = RELEASE_YEAR_MAX,
    );
}

fn select_input(out: &mut String, name: &str, enumeration: &Enumeration, selected: &str) {
    let _ = writeln!(
        out,
        r#"<label for="{name}">{label}</label>
<select id="{name}" name="{name}">"#,
        name = name,
        label = enumeration.group.label(),
    );
    for member in enumeration.sorted() {
        let member = escape_html(member);
        let marker = if member == escape_html(selected) {
            " selected"
        } else {
            ""
        };
        let _ = writeln!(out, r#"  <option value="{0}"{1}>{0}</option>"#, member, marker);
    }
    out.push_str("</select>\n");
}

/// Render the full page with optional result text
pub fn render_page(catalog: &Catalog, values: &FormValues, result: Option<&str>) -> String {
    let mut form = String::new();
    number_input(&mut form, "budget", "Budget (in USD)", &values.budget);
    number_input(&mut form, "popularity", "Popularity Score", &values.popularity);
    number_input(&mut form, "runtime", "Runtime (in minutes)", &values.runtime);
    year_input(&mut form, &values.release_year);
    select_input(&mut form, "genre", &catalog.genres, &values.genre);
    select_input(&mut form, "actor", &catalog.actors, &values.actor);
    select_input(&mut form, "director", &catalog.directors, &values.director);

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>
  body {{ font-family: sans-serif; max-width: 40rem; margin: 2rem auto; }}
  label {{ display: block; margin-top: 0.75rem; font-weight: bold; }}
  input, select, textarea {{ width: 100%; box-sizing: border-box; }}
  button {{ margin-top: 1rem; }}
</style>
</head>
<body>
<h1>&#127916; {title}</h1>
<p>{description}</p>
<form method="post" action="/">
{form}<button type="submit">Submit</button>
</form>
<label for="prediction">Prediction</label>
<textarea id="prediction" readonly rows="2">{result}</textarea>
</body>
</html>
"#,
        title = TITLE,
        description = escape_html(DESCRIPTION),
        form = form,
        result = escape_html(result.unwrap_or("")),
    )
}
