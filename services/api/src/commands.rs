use appraisal_desk::appraisal::{
    compute_appraisal, lookup_coefficient, AppraisalForm, AppraisalInput, AppraisalResult,
    ConditionRating, FieldValue, ROSS_HEIDECKE,
};
use appraisal_desk::config::AppConfig;
use appraisal_desk::error::AppError;
use appraisal_desk::exchange::{DolarApiClient, ExchangeRateSource};
use clap::Args;

#[derive(Args, Debug)]
pub(crate) struct AppraiseArgs {
    /// Property age in whole years (0-99)
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) age: f64,
    /// Condition rating on the 1-9 Ross-Heidecke scale
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) condition: f64,
    /// Replacement value of the structure as new
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) replacement: f64,
    /// Residual value of the structure at the end of its useful life
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) residual: f64,
    /// Land area in square meters
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) land_area: f64,
    /// Land value per square meter
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) land_unit_value: f64,
    /// Local units per foreign unit for the converted total
    #[arg(long, conflicts_with = "fetch_rate", allow_negative_numbers = true)]
    pub(crate) exchange_rate: Option<f64>,
    /// Poll the configured rate feed for the converted total
    #[arg(long)]
    pub(crate) fetch_rate: bool,
    /// Owner recorded on the appraisal
    #[arg(long, default_value = "Walk-in client")]
    pub(crate) owner: String,
    /// Property location recorded on the appraisal
    #[arg(long, default_value = "Unspecified")]
    pub(crate) location: String,
}

#[derive(Args, Debug)]
pub(crate) struct CoefficientArgs {
    /// Property age in years; clamped to the table
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) age: i64,
    /// Condition rating (1-9); clamped to the table
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) condition: i64,
}

#[derive(Args, Debug, Default)]
pub(crate) struct TableArgs {
    /// Only print the column for this condition rating
    #[arg(long, value_parser = clap::value_parser!(i64).range(1..=9))]
    pub(crate) condition: Option<i64>,
}

impl AppraiseArgs {
    fn form(&self) -> AppraisalForm {
        AppraisalForm {
            owner: self.owner.clone(),
            location: self.location.clone(),
            replacement_value: FieldValue::from(self.replacement),
            residual_value: FieldValue::from(self.residual),
            property_age: FieldValue::from(self.age),
            condition_rating: FieldValue::from(self.condition),
            land_area: FieldValue::from(self.land_area),
            land_unit_value: FieldValue::from(self.land_unit_value),
            exchange_rate: self.exchange_rate.map(FieldValue::from),
        }
    }
}

pub(crate) async fn run_appraise(args: AppraiseArgs) -> Result<(), AppError> {
    let validated = args.form().validate()?;

    let input = if args.fetch_rate {
        let config = AppConfig::load()?;
        let quote = DolarApiClient::new(&config.exchange)?
            .current_rate()
            .await?;
        println!(
            "Exchange rate {:.2} fetched at {}",
            quote.rate,
            quote.fetched_at.format("%Y-%m-%d %H:%M UTC")
        );
        validated.input_with_rate(quote.rate)
    } else {
        validated.input()
    };

    let result = compute_appraisal(&input);
    println!("Appraisal for {} ({})", validated.owner, validated.location);
    for line in render_appraisal(&input, &result) {
        println!("{line}");
    }
    Ok(())
}

pub(crate) fn run_coefficient(args: CoefficientArgs) -> Result<(), AppError> {
    let coefficient = lookup_coefficient(args.age, args.condition);
    let label = ConditionRating::from_rating(args.condition)
        .map(ConditionRating::label)
        .unwrap_or("out of scale, clamped");
    println!(
        "Age {} / condition {} ({label}): {coefficient:.2}%",
        args.age, args.condition
    );
    Ok(())
}

pub(crate) fn run_table(args: TableArgs) -> Result<(), AppError> {
    let selected = args.condition.and_then(ConditionRating::from_rating);
    for line in render_table(selected) {
        println!("{line}");
    }
    Ok(())
}

fn render_appraisal(input: &AppraisalInput, result: &AppraisalResult) -> Vec<String> {
    let mut lines = vec![
        format!(
            "  Depreciation coefficient: {:.2}%",
            result.depreciation_coefficient_percent
        ),
        format!("  Current structure value:  {:.2}", result.current_structure_value),
        format!("  Land value:               {:.2}", result.land_value),
        format!("  Total value:              {:.2}", result.total_value),
    ];
    if input.exchange_rate > 0.0 {
        lines.push(format!(
            "  Total in foreign currency: {:.2} (rate {:.2})",
            result.total_value_in_foreign_currency, input.exchange_rate
        ));
    } else {
        lines.push("  Total in foreign currency: not converted (no exchange rate)".to_string());
    }
    lines
}

fn render_table(selected: Option<ConditionRating>) -> Vec<String> {
    match selected {
        Some(condition) => {
            let mut lines = vec![format!("Age  {}", condition.label())];
            lines.extend(
                ROSS_HEIDECKE
                    .iter()
                    .enumerate()
                    .map(|(age, row)| format!("{age:>3}  {:>6.2}", row[condition.column()])),
            );
            lines
        }
        None => {
            let header = ConditionRating::ordered()
                .iter()
                .map(|condition| format!("{:>7}", condition.rating()))
                .collect::<String>();
            let mut lines = vec![format!("Age{header}")];
            lines.extend(ROSS_HEIDECKE.iter().enumerate().map(|(age, row)| {
                let cells = row
                    .iter()
                    .map(|value| format!("{value:>7.2}"))
                    .collect::<String>();
                format!("{age:>3}{cells}")
            }));
            lines
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> AppraiseArgs {
        AppraiseArgs {
            age: 10.0,
            condition: 2.0,
            replacement: 100_000.0,
            residual: 10_000.0,
            land_area: 300.0,
            land_unit_value: 150.0,
            exchange_rate: None,
            fetch_rate: false,
            owner: "Marta Quiroga".to_string(),
            location: "Córdoba".to_string(),
        }
    }

    #[test]
    fn appraisal_without_rate_is_not_converted() {
        let input = args().form().validate().expect("valid form").input();
        let lines = render_appraisal(&input, &compute_appraisal(&input));

        assert_eq!(lines[0], "  Depreciation coefficient: 5.53%");
        assert!(lines[4].contains("not converted"));
    }

    #[test]
    fn appraisal_with_rate_shows_converted_total() {
        let mut args = args();
        args.exchange_rate = Some(1_000.0);
        let input = args.form().validate().expect("valid form").input();
        let lines = render_appraisal(&input, &compute_appraisal(&input));

        assert!(lines[4].contains("rate 1000.00"));
    }

    #[test]
    fn invalid_arguments_surface_as_validation_errors() {
        let mut args = args();
        args.age = 120.0;
        let errors = args.form().validate().expect_err("age out of range");
        assert!(errors.get("property_age").is_some());
    }

    #[test]
    fn full_table_has_header_and_every_age() {
        let lines = render_table(None);
        assert_eq!(lines.len(), 101);
        assert!(lines[1].starts_with("  0"));
        assert!(lines[100].starts_with(" 99"));
    }

    #[test]
    fn single_column_table_uses_condition_label() {
        let lines = render_table(ConditionRating::from_rating(9));
        assert_eq!(lines[0], "Age  Worthless");
        assert!(lines[1].ends_with("100.00"));
    }
}
