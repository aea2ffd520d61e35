use crate::web::content;
use crate::web::model::PageModel;
use minijinja::{context, Environment, Error};
use serde::Serialize;
use winequality::dataset::{ReferenceSample, QUALITY_COLUMN};
use winequality::submission::{NAME_HINT, SURNAME_HINT};
use winequality::{FormInput, FormState, FIELD_SPECS};

const TEMPLATES: [(&str, &str); 4] = [
    ("layout.html", include_str!("../../templates/layout.html")),
    ("page.html", include_str!("../../templates/page.html")),
    ("outcome.html", include_str!("../../templates/outcome.html")),
    ("error.html", include_str!("../../templates/error.html")),
];

#[derive(Serialize)]
struct TextField {
    name: &'static str,
    label: &'static str,
    value: String,
    hint: &'static str,
}

#[derive(Serialize)]
struct NumberField {
    name: &'static str,
    label: &'static str,
    min: String,
    max: String,
    step: String,
    value: String,
}

#[derive(Serialize)]
struct GlossaryEntry {
    column: &'static str,
    meaning: &'static str,
}

#[derive(Serialize)]
struct SampleRow {
    index: usize,
    cells: Vec<String>,
    quality: u8,
}

#[derive(Serialize)]
struct OutcomeView {
    headers: Vec<&'static str>,
    cells: Vec<String>,
    low: String,
    high: String,
    image_url: String,
    image_alt: String,
}

/// HTML templates, compiled once at start-up. `.html` names auto-escape.
#[derive(Debug)]
pub struct Pages {
    env: Environment<'static>,
}

impl Pages {
    pub fn new() -> Result<Self, Error> {
        let mut env = Environment::new();
        for (name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }
        Ok(Self { env })
    }

    /// Renders the whole page for one request.
    pub fn render_page(&self, model: &PageModel<'_>) -> Result<String, Error> {
        let glossary: Vec<GlossaryEntry> = content::GLOSSARY
            .iter()
            .map(|&(column, meaning)| GlossaryEntry { column, meaning })
            .collect();
        let sample_columns: Vec<&str> = FIELD_SPECS
            .iter()
            .map(|spec| spec.name)
            .chain([QUALITY_COLUMN])
            .collect();

        self.env.get_template("page.html")?.render(context! {
            title => content::PAGE_TITLE,
            favicon => content::FAVICON_URL,
            style => content::STYLE,
            sidebar_prompt => content::SIDEBAR_PROMPT,
            text_fields => text_fields(model.form),
            number_fields => number_fields(model.form),
            intro => content::INTRO,
            hero_image => content::HERO_IMAGE,
            mission => content::MISSION,
            cellar_image => content::CELLAR_IMAGE,
            glossary => glossary,
            sample_columns => sample_columns,
            sample_rows => sample_rows(model.sample),
            outcome_header => content::OUTCOME_HEADER,
            outcome_info => content::OUTCOME_INFO,
            submit_prompt => content::SUBMIT_PROMPT,
            outcome => outcome_view(model.state),
            help_mailto => content::HELP_MAILTO,
            about_url => content::ABOUT_URL
        })
    }

    /// Fatal render failure surfaced to the user.
    pub fn render_error(&self, message: &str) -> Result<String, Error> {
        self.env.get_template("error.html")?.render(context! {
            title => content::PAGE_TITLE,
            favicon => content::FAVICON_URL,
            style => content::STYLE,
            message => message
        })
    }
}

fn text_fields(form: &FormInput) -> [TextField; 2] {
    [
        TextField {
            name: "name",
            label: "Name",
            value: form.name.clone(),
            hint: NAME_HINT,
        },
        TextField {
            name: "surname",
            label: "Surname",
            value: form.surname.clone(),
            hint: SURNAME_HINT,
        },
    ]
}

fn number_fields(form: &FormInput) -> Vec<NumberField> {
    form.features
        .fields()
        .map(|(spec, value)| NumberField {
            name: spec.name,
            label: spec.label,
            min: spec.format(spec.min),
            max: spec.format(spec.max),
            step: spec.format(spec.step),
            value: spec.format(value),
        })
        .collect()
}

fn sample_rows(sample: &ReferenceSample) -> Vec<SampleRow> {
    sample
        .rows
        .iter()
        .map(|row| SampleRow {
            index: row.index,
            cells: row.features.values().iter().map(f64::to_string).collect(),
            quality: row.quality.label(),
        })
        .collect()
}

fn outcome_view(state: &FormState) -> Option<OutcomeView> {
    state.outcome().map(|outcome| {
        let (headers, cells): (Vec<&'static str>, Vec<String>) =
            outcome.record.columns().into_iter().unzip();
        let [low, high] = outcome.prediction.probabilities;
        OutcomeView {
            headers,
            cells,
            low: format!("{:.2}", low),
            high: format!("{:.2}", high),
            image_url: outcome.image.url.to_string(),
            image_alt: outcome.image.alt.to_string(),
        }
    })
}
