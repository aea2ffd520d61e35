use iced::{
    mouse,
    widget::{
        button,
        canvas::{self, Canvas, Frame, Geometry},
        column, row, scrollable, text, text_input, Column, Container,
    },
    Alignment, Color, Element, Length, Point, Rectangle, Renderer, Size, Task, Theme,
};
use winequality::dataset::ReferenceSample;
use winequality::features::FEATURE_COUNT;
use winequality::submission::{NAME_HINT, SURNAME_HINT};
use winequality::{FeatureRecord, FormInput, SubmissionOutcome, FIELD_SPECS};

const SERVER_URL: &str = "http://127.0.0.1:9000";

fn main() -> iced::Result {
    iced::application(Desktop::boot, Desktop::update, Desktop::view)
        .title(application_title)
        .theme(application_theme)
        .run()
}

fn application_title(_: &Desktop) -> String {
    "Red Wine Quality Classifier".into()
}

fn application_theme(_: &Desktop) -> Theme {
    Theme::Light
}

#[derive(Debug)]
struct Desktop {
    form: FormFields,
    sample: Option<ReferenceSample>,
    outcome: Option<SubmissionOutcome>,
    status: String,
    history: Vec<String>,
}

#[derive(Debug, Clone)]
enum Message {
    SampleFetched(Result<ReferenceSample, String>),
    NameChanged(String),
    SurnameChanged(String),
    FeatureChanged(usize, String),
    Submit,
    Submitted(Result<SubmissionOutcome, String>),
}

impl Desktop {
    fn boot() -> (Self, Task<Message>) {
        (
            Desktop {
                form: FormFields::default(),
                sample: None,
                outcome: None,
                status: "Loading reference sample...".into(),
                history: Vec::new(),
            },
            Task::perform(fetch_sample(), Message::SampleFetched),
        )
    }

    fn update(state: &mut Self, message: Message) -> Task<Message> {
        match message {
            Message::SampleFetched(Ok(sample)) => {
                state.status = format!("Reference sample: {} rows", sample.len());
                state.sample = Some(sample);
                Task::none()
            }
            Message::SampleFetched(Err(err)) => {
                state.status = format!("Sample error: {err}");
                Task::none()
            }
            Message::NameChanged(value) => {
                state.form.name = value;
                Task::none()
            }
            Message::SurnameChanged(value) => {
                state.form.surname = value;
                Task::none()
            }
            Message::FeatureChanged(idx, value) => {
                if let Some(slot) = state.form.values.get_mut(idx) {
                    *slot = value;
                }
                Task::none()
            }
            Message::Submit => {
                let input = state.form.to_input();
                state.form.show(&input);
                Task::perform(post_submission(input), Message::Submitted)
            }
            Message::Submitted(Ok(outcome)) => {
                state.status = "The outcome is located beneath.".into();
                state.push_history(format!(
                    "{} {} {}: {}",
                    outcome.record.name,
                    outcome.record.surname,
                    outcome.record.time,
                    outcome.record.prediction
                ));
                state.outcome = Some(outcome);
                Task::none()
            }
            Message::Submitted(Err(err)) => {
                state.status = format!("Prediction error: {err}");
                state.outcome = None;
                Task::none()
            }
        }
    }

    fn view(state: &Self) -> Element<'_, Message> {
        let mut form_column = Column::new()
            .spacing(8)
            .padding(16)
            .width(Length::Fixed(320.0))
            .push(text("Select the features from the options below to view the outcome!").size(14))
            .push(text("Name").size(13))
            .push(
                text_input(NAME_HINT, &state.form.name)
                    .on_input(Message::NameChanged)
                    .padding(6),
            )
            .push(text("Surname").size(13))
            .push(
                text_input(SURNAME_HINT, &state.form.surname)
                    .on_input(Message::SurnameChanged)
                    .padding(6),
            );

        for (idx, spec) in FIELD_SPECS.iter().enumerate() {
            form_column = form_column
                .push(
                    text(format!(
                        "{} ({} to {})",
                        spec.label,
                        spec.format(spec.min),
                        spec.format(spec.max)
                    ))
                    .size(13),
                )
                .push(
                    text_input(spec.label, &state.form.values[idx])
                        .on_input(move |value| Message::FeatureChanged(idx, value))
                        .padding(6),
                );
        }
        let form_column = form_column
            .push(button("Submit").on_press(Message::Submit).padding(10))
            .push(text(&state.status).size(13));

        let sample_rows = match &state.sample {
            Some(sample) if !sample.is_empty() => {
                sample
                    .rows
                    .iter()
                    .fold(Column::new().spacing(4), |col, sample_row| {
                        let cells = sample_row
                            .features
                            .fields()
                            .map(|(spec, value)| spec.format(value))
                            .collect::<Vec<_>>()
                            .join(" | ");
                        col.push(
                            text(format!(
                                "#{}: {} | quality {}",
                                sample_row.index,
                                cells,
                                sample_row.quality.label()
                            ))
                            .size(12),
                        )
                    })
            }
            _ => Column::new().push(text("No reference rows").size(12)),
        };

        let outcome_panel = match &state.outcome {
            None => Column::new().push(text("Please click on Submit button!").size(16)),
            Some(outcome) => {
                let record_rows = outcome.record.columns().into_iter().fold(
                    Column::new().spacing(2),
                    |col, (header, value)| col.push(text(format!("{header}: {value}")).size(13)),
                );
                let [low, high] = outcome.prediction.probabilities;
                column![
                    text("The outcome is located beneath.").size(14),
                    text(outcome.record.prediction.clone()).size(24),
                    Container::new(record_rows).padding(6),
                    text(format!("Probability: Low {low:.2} / High {high:.2}")).size(14),
                    Canvas::new(ProbabilityBar {
                        high: high as f32
                    })
                    .width(Length::Fill)
                    .height(Length::Fixed(28.0)),
                    text(format!("Illustration: {}", outcome.image.url)).size(11),
                ]
                .spacing(8)
            }
        };

        let history_list = if state.history.is_empty() {
            Column::new().push(text("No submissions yet").size(12))
        } else {
            state
                .history
                .iter()
                .rev()
                .fold(Column::new().spacing(4), |col, entry| {
                    col.push(text(entry.clone()).size(12))
                })
        };

        let result_column = column![
            text("Red Wine Quality Classifier").size(26),
            text("Reference sample").size(16),
            Container::new(scrollable(sample_rows).height(Length::Fixed(140.0))).padding(6),
            text("Outcome").size(22),
            outcome_panel,
            text("Session submissions").size(16),
            Container::new(scrollable(history_list).height(Length::Fixed(90.0))).padding(6),
        ]
        .spacing(10)
        .padding(16)
        .width(Length::Fill);

        let layout = row![scrollable(form_column), result_column]
            .spacing(20)
            .align_y(Alignment::Start)
            .padding(20);

        Container::new(layout)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn push_history(&mut self, entry: String) {
        self.history.push(entry);
        if self.history.len() > 20 {
            self.history.remove(0);
        }
    }
}

async fn fetch_sample() -> Result<ReferenceSample, String> {
    let response = reqwest::get(format!("{SERVER_URL}/api/sample"))
        .await
        .map_err(|e| e.to_string())?;
    response
        .json::<ReferenceSample>()
        .await
        .map_err(|e| e.to_string())
}

async fn post_submission(input: FormInput) -> Result<SubmissionOutcome, String> {
    let client = reqwest::Client::new();
    let response = client
        .post(format!("{SERVER_URL}/api/submit"))
        .json(&input)
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if response.status().is_success() {
        response
            .json::<SubmissionOutcome>()
            .await
            .map_err(|e| e.to_string())
    } else {
        let status = response.status();
        let text = response.text().await.unwrap_or_else(|_| "".into());
        Err(format!("{}: {}", status, text))
    }
}

/// Raw widget text for the sidebar.
#[derive(Debug, Clone)]
struct FormFields {
    name: String,
    surname: String,
    values: Vec<String>,
}

impl Default for FormFields {
    fn default() -> Self {
        Self {
            name: String::new(),
            surname: String::new(),
            values: FIELD_SPECS
                .iter()
                .map(|spec| spec.format(spec.default_value()))
                .collect(),
        }
    }
}

impl FormFields {
    /// Unparseable text falls back to the widget default; the rest is clamped.
    fn to_input(&self) -> FormInput {
        let mut values = [0.0; FEATURE_COUNT];
        for ((slot, spec), raw) in values.iter_mut().zip(FIELD_SPECS.iter()).zip(&self.values) {
            *slot = raw
                .trim()
                .parse::<f64>()
                .map(|value| spec.clamp(value))
                .unwrap_or_else(|_| spec.default_value());
        }
        FormInput {
            name: self.name.clone(),
            surname: self.surname.clone(),
            features: FeatureRecord::from_values(values),
        }
    }

    /// Rewrites the widgets with what is actually submitted.
    fn show(&mut self, input: &FormInput) {
        self.values = input
            .features
            .fields()
            .map(|(spec, value)| spec.format(value))
            .collect();
    }
}

#[derive(Clone)]
struct ProbabilityBar {
    high: f32,
}

impl canvas::Program<Message> for ProbabilityBar {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        let split = bounds.width * self.high.clamp(0.0, 1.0);

        frame.fill_rectangle(
            Point::ORIGIN,
            Size::new(bounds.width - split, bounds.height),
            Color::from_rgb(0.55, 0.55, 0.6),
        );
        frame.fill_rectangle(
            Point::new(bounds.width - split, 0.0),
            Size::new(split, bounds.height),
            Color::from_rgb(0.6, 0.05, 0.15),
        );

        vec![frame.into_geometry()]
    }
}
