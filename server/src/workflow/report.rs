use winequality::SubmissionOutcome;

/// Plain-text rendering of the results table for the one-shot mode.
pub fn outcome_table(outcome: &SubmissionOutcome) -> String {
    let columns = outcome.record.columns();
    let widths: Vec<usize> = columns
        .iter()
        .map(|(header, value)| header.len().max(value.chars().count()))
        .collect();

    let header = columns
        .iter()
        .zip(&widths)
        .map(|((header, _), width)| format!("{:>width$}", header, width = width))
        .collect::<Vec<_>>()
        .join(" | ");
    let values = columns
        .iter()
        .zip(&widths)
        .map(|((_, value), width)| format!("{:>width$}", value, width = width))
        .collect::<Vec<_>>()
        .join(" | ");
    let [low, high] = outcome.prediction.probabilities;

    format!(
        "{}\n{}\n{}\nprobabilities: low {:.2} / high {:.2}\nimage: {}\n",
        header,
        "-".repeat(header.len()),
        values,
        low,
        high,
        outcome.image.url
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::demo::demo_forest;
    use chrono::NaiveDate;
    use winequality::submission::submit;
    use winequality::FormInput;

    #[test]
    fn table_lines_align() {
        let forest = demo_forest().unwrap();
        let at = NaiveDate::from_ymd_opt(2023, 11, 2)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        let input = FormInput {
            name: "Grace".into(),
            surname: "Hopper".into(),
            ..Default::default()
        };
        let outcome = submit(&forest, &input, at).unwrap();
        let table = outcome_table(&outcome);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines[0].len(), lines[2].len());
        assert!(lines[0].ends_with("Prediction"));
        assert!(lines[2].contains("2023-11-02 | 09:30:00"));
        assert!(lines[2].ends_with(&outcome.record.prediction));
        assert!(lines[3].starts_with("probabilities: low"));
    }
}
