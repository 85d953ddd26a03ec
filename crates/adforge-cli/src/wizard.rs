//! The interactive terminal wizard.
//!
//! Each loop iteration renders the session's current screen and waits for
//! one line of input. All state lives in [`Session`]; the wizard only keeps
//! the form draft (so values survive a trip back to the form) and the chat
//! transcript.

use std::io::Write as _;
use std::str::FromStr;

use adforge_core::{
    AppConfig, CampaignDraft, MediaTypeSet, StatusFilter, AUDIENCE_CHOICES, COUNTRY_CHOICES,
};
use adforge_session::{Screen, Session, SessionConfig, DEFAULT_FEEDBACK};
use adforge_webhook::WebhookClient;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use crate::download::{save_creative, Saved};
use crate::render;

/// Whether the wizard keeps running after a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// A command typed on the results screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ResultsCommand {
    /// 1-based card numbers to toggle.
    Toggle(Vec<usize>),
    Confirm,
    GoThrough,
    Back,
    Quit,
}

impl FromStr for ResultsCommand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "c" | "confirm" => Ok(Self::Confirm),
            "g" | "go" => Ok(Self::GoThrough),
            "b" | "back" => Ok(Self::Back),
            "q" | "quit" => Ok(Self::Quit),
            other => other
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|part| !part.is_empty())
                .map(|part| {
                    part.parse::<usize>()
                        .ok()
                        .filter(|n| *n > 0)
                        .ok_or_else(|| format!("unrecognised input \"{part}\""))
                })
                .collect::<Result<Vec<_>, _>>()
                .and_then(|numbers| {
                    if numbers.is_empty() {
                        Err("enter card numbers, c, g, b or q".to_string())
                    } else {
                        Ok(Self::Toggle(numbers))
                    }
                }),
        }
    }
}

/// A line typed on the feedback screen: free text is feedback, lines
/// starting with `:` are commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum FeedbackInput {
    Message(String),
    GoThrough,
    Download(usize),
    Back,
    NewSession,
    Quit,
    Unknown(String),
}

impl FeedbackInput {
    pub(crate) fn parse(line: &str) -> Self {
        let line = line.trim();
        let Some(command) = line.strip_prefix(':') else {
            return if line.is_empty() {
                Self::Message(DEFAULT_FEEDBACK.to_string())
            } else {
                Self::Message(line.to_string())
            };
        };
        let mut parts = command.split_whitespace();
        match (parts.next(), parts.next()) {
            (Some("g" | "go"), None) => Self::GoThrough,
            (Some("b" | "back"), None) => Self::Back,
            (Some("n" | "new"), None) => Self::NewSession,
            (Some("q" | "quit"), None) => Self::Quit,
            (Some("d" | "download"), Some(n)) => match n.parse::<usize>() {
                Ok(n) if n > 0 => Self::Download(n),
                _ => Self::Unknown(line.to_string()),
            },
            _ => Self::Unknown(line.to_string()),
        }
    }
}

/// Line-oriented stdin reader. `None` means end of input.
struct Prompt {
    lines: Lines<BufReader<Stdin>>,
}

impl Prompt {
    fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    async fn ask(&mut self, question: &str) -> anyhow::Result<Option<String>> {
        print!("{question}");
        std::io::stdout().flush()?;
        Ok(self.lines.next_line().await?.map(|line| line.trim().to_string()))
    }

    /// Asks with the current value shown; blank input keeps it.
    async fn ask_with_default(
        &mut self,
        label: &str,
        current: &str,
    ) -> anyhow::Result<Option<String>> {
        let question = if current.is_empty() {
            format!("{label}: ")
        } else {
            format!("{label} [{current}]: ")
        };
        Ok(self.ask(&question).await?.map(|answer| {
            if answer.is_empty() {
                current.to_string()
            } else {
                answer
            }
        }))
    }
}

struct Wizard {
    session: Session,
    draft: CampaignDraft,
    output_dir: std::path::PathBuf,
    transcript_started: bool,
    prompt: Prompt,
}

/// Runs the wizard until the user quits or stdin closes.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built or the terminal
/// cannot be read or written.
pub(crate) async fn run_wizard(config: &AppConfig) -> anyhow::Result<()> {
    let client = WebhookClient::new(config.webhook_timeout_secs, &config.user_agent)?;
    let session = Session::new(client, SessionConfig::from(config));
    tracing::info!(session_id = %session.state().id(), "wizard started");

    let mut wizard = Wizard {
        session,
        draft: CampaignDraft::default(),
        output_dir: config.output_dir.clone(),
        transcript_started: false,
        prompt: Prompt::new(),
    };

    loop {
        let flow = match wizard.session.state().screen() {
            Screen::Landing => wizard.landing().await?,
            Screen::Form => wizard.form().await?,
            Screen::Results => wizard.results().await?,
            Screen::Feedback => wizard.feedback().await?,
            Screen::Processing => {
                tracing::warn!("wizard resumed on the processing screen; starting over");
                wizard.session.reset();
                Flow::Continue
            }
        };
        if flow == Flow::Quit {
            println!("Goodbye.");
            return Ok(());
        }
    }
}

impl Wizard {
    async fn landing(&mut self) -> anyhow::Result<Flow> {
        render::print_landing();
        match self.prompt.ask("Press Enter to get started (q to quit): ").await? {
            None => Ok(Flow::Quit),
            Some(answer) if answer.eq_ignore_ascii_case("q") => Ok(Flow::Quit),
            Some(_) => {
                self.session.start()?;
                Ok(Flow::Continue)
            }
        }
    }

    async fn form(&mut self) -> anyhow::Result<Flow> {
        println!();
        println!("Campaign details");
        if let Some(error) = self.session.state().error() {
            println!("  ! {error}");
        }

        if self.fill_draft().await?.is_none() {
            return Ok(Flow::Quit);
        }

        let Some(answer) = self
            .prompt
            .ask("Find top ads? [Y]es / [e]dit / [b]ack: ")
            .await?
        else {
            return Ok(Flow::Quit);
        };
        match answer.to_ascii_lowercase().as_str() {
            "b" | "back" => {
                self.session.back()?;
                return Ok(Flow::Continue);
            }
            "e" | "edit" => return Ok(Flow::Continue),
            _ => {}
        }

        let campaign = match self.draft.submit() {
            Ok(campaign) => campaign,
            Err(e) => {
                println!("  ! {e}");
                return Ok(Flow::Continue);
            }
        };

        render::print_processing(&campaign);
        self.session.submit_form(campaign).await?;
        Ok(Flow::Continue)
    }

    /// Walks every form field. `None` means stdin closed.
    async fn fill_draft(&mut self) -> anyhow::Result<Option<()>> {
        let Some(product) = self
            .prompt
            .ask_with_default("Product or brand name", &self.draft.product_name)
            .await?
        else {
            return Ok(None);
        };
        self.draft.product_name = product;

        let codes: Vec<&str> = COUNTRY_CHOICES.iter().map(|(code, _)| *code).collect();
        println!("  Countries: {}", codes.join(", "));
        let Some(country) = self
            .prompt
            .ask_with_default("Country", &self.draft.country)
            .await?
        else {
            return Ok(None);
        };
        self.draft.country = country.to_ascii_uppercase();

        for (index, audience) in AUDIENCE_CHOICES.iter().enumerate() {
            println!("  {}. {audience}", index + 1);
        }
        let Some(audience) = self
            .prompt
            .ask_with_default("Target audience (number or text)", &self.draft.audience)
            .await?
        else {
            return Ok(None);
        };
        self.draft.audience = pick_audience(&audience);

        loop {
            let current = self.draft.status.map(StatusFilter::label).unwrap_or_default();
            let Some(status) = self
                .prompt
                .ask_with_default("Ad status (Active/Inactive/Both)", current)
                .await?
            else {
                return Ok(None);
            };
            match StatusFilter::from_str(&status) {
                Ok(status) => {
                    self.draft.status = Some(status);
                    break;
                }
                Err(_) if status.is_empty() => break,
                Err(e) => println!("  ! {e}"),
            }
        }

        loop {
            let current = self.draft.media_types.to_wire();
            let Some(media) = self
                .prompt
                .ask_with_default("Media types (Video, Image; '-' for any)", &current)
                .await?
            else {
                return Ok(None);
            };
            let media = if media == "-" { String::new() } else { media };
            match MediaTypeSet::from_str(&media) {
                Ok(set) => {
                    self.draft.media_types = set;
                    break;
                }
                Err(e) => println!("  ! {e}"),
            }
        }

        for field in [DateField::Start, DateField::End] {
            loop {
                let current = field
                    .get(&self.draft)
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_default();
                let Some(raw) = self
                    .prompt
                    .ask_with_default(field.label(), &current)
                    .await?
                else {
                    return Ok(None);
                };
                if raw.is_empty() {
                    break;
                }
                match field.set(&mut self.draft, &raw) {
                    Ok(()) => break,
                    Err(e) => println!("  ! {e}"),
                }
            }
        }

        loop {
            let current = self.draft.max_items.to_string();
            let Some(raw) = self
                .prompt
                .ask_with_default("Maximum ads to fetch", &current)
                .await?
            else {
                return Ok(None);
            };
            match raw.parse::<u32>() {
                Ok(n) => {
                    self.draft.max_items = n;
                    break;
                }
                Err(e) => println!("  ! {e}"),
            }
        }

        Ok(Some(()))
    }

    async fn results(&mut self) -> anyhow::Result<Flow> {
        let renderable = self.session.state().renderable_ads();
        println!();
        println!(
            "Top ads: {} shown of {} fetched, {} selected",
            renderable.len(),
            self.session.state().ads().len(),
            self.session.state().selection_count()
        );
        if renderable.is_empty() {
            println!("  No displayable ads in this batch. Go back to adjust the search.");
        }
        for (index, ad) in renderable.iter().enumerate() {
            render::print_ad(index + 1, ad);
        }

        let Some(line) = self
            .prompt
            .ask("Toggle by number, [c]onfirm, [g]o through, [b]ack, [q]uit: ")
            .await?
        else {
            return Ok(Flow::Quit);
        };
        let command = match ResultsCommand::from_str(&line) {
            Ok(command) => command,
            Err(message) => {
                println!("  ! {message}");
                return Ok(Flow::Continue);
            }
        };

        match command {
            ResultsCommand::Toggle(numbers) => {
                for number in numbers {
                    match renderable.get(number - 1).and_then(|ad| ad.id()) {
                        Some(id) => {
                            self.session.toggle_selection(id)?;
                        }
                        None => println!("  ! no ad numbered {number}"),
                    }
                }
            }
            ResultsCommand::Confirm => self.session.confirm_selection()?,
            ResultsCommand::GoThrough => self.generate(DEFAULT_FEEDBACK).await?,
            ResultsCommand::Back => self.session.back()?,
            ResultsCommand::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    async fn feedback(&mut self) -> anyhow::Result<Flow> {
        self.open_transcript();

        let Some(line) = self
            .prompt
            .ask("\nYou (blank for default, :g go through, :d N download, :b back, :n new, :q quit): ")
            .await?
        else {
            return Ok(Flow::Quit);
        };

        match FeedbackInput::parse(&line) {
            FeedbackInput::Message(text) => self.generate(&text).await?,
            FeedbackInput::GoThrough => self.generate(DEFAULT_FEEDBACK).await?,
            FeedbackInput::Download(number) => self.download(number).await,
            FeedbackInput::Back => {
                self.transcript_started = false;
                self.session.back()?;
            }
            FeedbackInput::NewSession => {
                self.transcript_started = false;
                self.draft = CampaignDraft::default();
                self.session.reset();
            }
            FeedbackInput::Quit => return Ok(Flow::Quit),
            FeedbackInput::Unknown(input) => println!("  ! unknown command \"{input}\""),
        }
        Ok(Flow::Continue)
    }

    fn open_transcript(&mut self) {
        if self.transcript_started {
            return;
        }
        println!();
        println!(
            "AI Strategy Session ({} ads selected)",
            self.session.state().selection().len()
        );
        render::print_assistant(render::WELCOME_MESSAGE);
        self.transcript_started = true;
    }

    /// Sends feedback and prints whatever came back.
    async fn generate(&mut self, feedback: &str) -> anyhow::Result<()> {
        if self.session.state().screen() == Screen::Results {
            self.session.confirm_selection()?;
            self.open_transcript();
        }
        println!("  You | {feedback}");
        render::print_assistant(render::ACK_MESSAGE);

        self.session.submit_feedback(feedback).await?;

        let state = self.session.state();
        if let Some(error) = state.error() {
            println!("  ! {error}");
        }
        println!();
        println!("Generated content");
        for (index, item) in self.session.feedback_assets().iter().enumerate() {
            render::print_generated(index + 1, item);
        }
        println!(
            "  (sample video poster: {})",
            self.session.config().sample_image_path
        );
        Ok(())
    }

    /// Download failures are reported, never fatal.
    async fn download(&self, number: usize) {
        let assets = self.session.feedback_assets();
        let Some(item) = assets.get(number - 1) else {
            println!("  ! no item numbered {number}");
            return;
        };
        match save_creative(self.session.client(), item, &self.output_dir).await {
            Ok(Saved::Written(path)) => println!("  Saved to {}", path.display()),
            Ok(Saved::LocalAsset(path)) => println!("  Bundled asset, available at {path}"),
            Err(e) => {
                tracing::warn!(error = %e, "download failed");
                println!("  ! download failed: {e}");
            }
        }
    }
}

/// Accepts a 1-based index into [`AUDIENCE_CHOICES`] or free text.
pub(crate) fn pick_audience(input: &str) -> String {
    input
        .trim()
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| AUDIENCE_CHOICES.get(i))
        .map_or_else(|| input.trim().to_string(), |choice| (*choice).to_string())
}

#[derive(Debug, Clone, Copy)]
enum DateField {
    Start,
    End,
}

impl DateField {
    fn label(self) -> &'static str {
        match self {
            DateField::Start => "Start date (YYYY-MM-DD)",
            DateField::End => "End date (YYYY-MM-DD)",
        }
    }

    fn get(self, draft: &CampaignDraft) -> Option<chrono::NaiveDate> {
        match self {
            DateField::Start => draft.start_date,
            DateField::End => draft.end_date,
        }
    }

    fn set(self, draft: &mut CampaignDraft, raw: &str) -> Result<(), adforge_core::FormError> {
        match self {
            DateField::Start => draft.set_start_date(raw),
            DateField::End => draft.set_end_date(raw),
        }
    }
}
