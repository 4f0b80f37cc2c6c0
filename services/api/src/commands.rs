use crate::infra::address_book;
use clap::Args;
use landlord_aid::config::AppConfig;
use landlord_aid::error::AppError;
use landlord_aid::workflows::dashboard::{render_text, Dashboard};
use landlord_aid::workflows::eligibility::{
    Assessment, EligibilityScorer, HeuristicScorer, ScoringMode,
};
use landlord_aid::workflows::intake::{AddressBook, ApplicationData, FormStep, IntakeForm};
use landlord_aid::workflows::submission::{
    ApplicationTransport, HttpTransport, JsonFileStore, LocalStore, SubmissionClient,
    SubmissionError, SubmissionOutcome,
};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DashboardArgs {
    /// Saved application state to read (defaults to APP_LOCAL_STATE)
    #[arg(long)]
    pub(crate) local_state: Option<PathBuf>,
    /// Print the dashboard as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// Application JSON in the shape the intake form submits
    #[arg(long)]
    pub(crate) file: PathBuf,
    /// Print the assessment as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct SubmitArgs {
    /// Application JSON in the shape the intake form submits
    #[arg(long)]
    pub(crate) file: PathBuf,
    /// Base URL of a running intake service (defaults to the configured host and port)
    #[arg(long)]
    pub(crate) endpoint: Option<String>,
    /// Where to keep the local copy (defaults to APP_LOCAL_STATE)
    #[arg(long)]
    pub(crate) local_state: Option<PathBuf>,
}

pub(crate) async fn run_submit(args: SubmitArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let endpoint = args
        .endpoint
        .unwrap_or_else(|| format!("http://{}:{}", config.server.host, config.server.port));
    let local_state = args
        .local_state
        .unwrap_or_else(|| config.storage.local_state.clone());

    let data = read_application(&args.file)?;
    let client = SubmissionClient::new(
        Arc::new(HttpTransport::new(&endpoint)),
        Arc::new(JsonFileStore::new(&local_state)),
    );

    let outcome = match submit_application(&client, address_book(&config)?, data).await {
        Ok(outcome) => outcome,
        Err(err) => {
            if let Some(notice) = err.user_notice() {
                eprintln!("{notice}");
            }
            return Err(err.into());
        }
    };

    let message = outcome.acknowledgement.body["message"]
        .as_str()
        .unwrap_or("Application submitted");
    println!("{message} (HTTP {})", outcome.acknowledgement.status);
    if outcome.saved_locally {
        println!("Saved to {}; next: {}", local_state.display(), outcome.destination.path());
    } else {
        eprintln!("The local copy at {} could not be written.", local_state.display());
    }
    Ok(())
}

/// Walk the form from step 1 so every step validates before the final submit.
async fn submit_application<T, S>(
    client: &SubmissionClient<T, S>,
    addresses: Arc<AddressBook>,
    data: ApplicationData,
) -> Result<SubmissionOutcome, SubmissionError>
where
    T: ApplicationTransport + 'static,
    S: LocalStore + 'static,
{
    let mut form = IntakeForm::resume(addresses, Some(data), None);
    while form.step() != FormStep::Repairs {
        form.next()?;
    }
    client.submit(&mut form).await
}

pub(crate) fn run_dashboard(args: DashboardArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let path = args.local_state.unwrap_or(config.storage.local_state);
    let dashboard = load_dashboard(path, config.intake.scoring)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&dashboard)?);
    } else {
        print!("{}", render_text(&dashboard));
    }
    Ok(())
}

pub(crate) fn run_assess(args: AssessArgs) -> Result<(), AppError> {
    let assessment = assess_file(&args.file)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&assessment)?);
    } else {
        print!("{}", render_assessment(&assessment));
    }
    Ok(())
}

fn load_dashboard(path: PathBuf, scoring: ScoringMode) -> Result<Dashboard, AppError> {
    let store = JsonFileStore::new(path);
    Ok(Dashboard::load(&store, scoring)?)
}

fn read_application(path: &Path) -> Result<ApplicationData, AppError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

fn assess_file(path: &Path) -> Result<Assessment, AppError> {
    Ok(HeuristicScorer.assess(&read_application(path)?))
}

fn render_assessment(assessment: &Assessment) -> String {
    let mut out = String::new();
    writeln!(
        &mut out,
        "{} (score {}/100)",
        assessment.status_label(),
        assessment.score
    )
    .expect("write status");
    writeln!(&mut out, "Potential aid: {}", assessment.funding_label()).expect("write funding");

    if assessment.components.is_empty() {
        writeln!(&mut out, "\nNo scoring factors matched.").expect("write factors");
    } else {
        writeln!(&mut out, "\nScoring factors:").expect("write factors");
        for component in &assessment.components {
            writeln!(
                &mut out,
                "- {:?}: +{} ({})",
                component.factor, component.points, component.notes
            )
            .expect("write factor");
        }
    }

    writeln!(&mut out, "\nNext steps:").expect("write next steps");
    for step in assessment.status.next_steps() {
        writeln!(&mut out, "- {step}").expect("write next step");
    }
    out
}
