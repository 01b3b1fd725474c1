use iced::task;
use iced::widget::image as picture;
use iced::widget::{
    button, column, container, horizontal_rule, horizontal_space, pick_list, row, scrollable,
    slider, text, text_input, Column,
};
use iced::{Alignment, Element, Length, Task, Theme};
use rfd::FileDialog;
use std::path::PathBuf;

mod api;
mod canvas;
mod config;
mod error;
mod state;
mod ui;

use api::auth::AuthClient;
use api::images::ImagesClient;
use canvas::CanonicalImage;
use config::AppConfig;
use error::{AppError, AuthError, CanvasError, GenerationError, LibraryError};
use state::data::{Kind, LibraryEntry};
use state::library::Library;
use state::options::{self, Background, GenerationOptions, ImageSize, Quality};
use state::session::Session;

/// Width of the normalized upload preview
const PREVIEW_WIDTH: f32 = 320.0;

/// A normalized upload, ready for API submission
#[derive(Debug, Clone)]
struct Upload {
    /// Original filename, for status display
    filename: String,
    /// The canonical letterboxed image
    image: CanonicalImage,
    /// Decoded preview handle for the UI
    preview: picture::Handle,
}

/// Result of one completed generation action
#[derive(Debug, Clone)]
struct ActionSuccess {
    /// Entries written to the library, in order
    entries: Vec<LibraryEntry>,
    /// PNG bytes of the first result, for the preview pane
    first_png: Vec<u8>,
}

/// Side-by-side preview shown after an action completes
#[derive(Debug, Clone)]
struct ResultPreview {
    /// The normalized source, when the action had one
    original: Option<picture::Handle>,
    result: picture::Handle,
    caption: String,
}

/// Main application state
struct Artify {
    config: AppConfig,
    /// Session-scoped auth context; gates the studio screen
    session: Session,
    /// The folder-backed result library
    library: Library,

    // Login screen
    email: String,
    password: String,
    auth_status: String,

    // Stylize panel
    source: Option<Upload>,
    style: &'static str,
    custom_prompt: String,
    options: GenerationOptions,

    // Mix panel
    mix_first: Option<Upload>,
    mix_second: Option<Upload>,
    mix_prompt: String,

    // Generate panel
    generate_text: String,
    generate_style: &'static str,

    // Library and activity
    entries: Vec<LibraryEntry>,
    preview: Option<ResultPreview>,
    /// Label of the action in flight; None when idle
    busy: Option<&'static str>,
    /// Abort handle for the in-flight generation task
    abort: Option<task::Handle>,
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    // Authentication
    EmailChanged(String),
    PasswordChanged(String),
    SignInPressed,
    SignUpPressed,
    SignInFinished(Result<Session, AuthError>),
    SignUpFinished(Result<(), AuthError>),
    SignOut,

    // Uploads
    PickSource,
    SourceLoaded(Result<Upload, CanvasError>),
    PickMixFirst,
    MixFirstLoaded(Result<Upload, CanvasError>),
    PickMixSecond,
    MixSecondLoaded(Result<Upload, CanvasError>),

    // Option widgets
    StyleSelected(&'static str),
    CustomPromptChanged(String),
    BackgroundSelected(Background),
    QualitySelected(Quality),
    SizeSelected(ImageSize),
    CountChanged(u8),
    UserChanged(String),
    MixPromptChanged(String),
    GenerateTextChanged(String),
    GenerateStyleSelected(&'static str),

    // Actions
    StylizePressed,
    CombinePressed,
    GeneratePressed,
    CancelPressed,
    ActionFinished(Kind, Result<ActionSuccess, AppError>),

    // Library
    DownloadEntry(String),
    DeleteEntry(String),
    RefreshLibrary,
}

impl Artify {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        let config = AppConfig::load();
        let library = Library::new(config.library_root());

        // An unavailable library is reported per action, not fatal here
        if let Err(e) = library.ensure() {
            log::warn!("library not ready: {}", e);
        }

        let entries = library.list();
        log::info!("🎨 ArtifyAI initialized with {} images", entries.len());
        let status = format!("Ready. {} images in library.", entries.len());
        let options = config.options.clone().unwrap_or_default();

        (
            Artify {
                config,
                session: Session::signed_out(),
                library,
                email: String::new(),
                password: String::new(),
                auth_status: String::new(),
                source: None,
                style: "None",
                custom_prompt: String::new(),
                options,
                mix_first: None,
                mix_second: None,
                mix_prompt: String::new(),
                generate_text: String::new(),
                generate_style: "None",
                entries,
                preview: None,
                busy: None,
                abort: None,
                status,
            },
            Task::none(),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            // ----- Authentication -----
            Message::EmailChanged(email) => {
                self.email = email;
                Task::none()
            }
            Message::PasswordChanged(password) => {
                self.password = password;
                Task::none()
            }
            Message::SignInPressed => self.start_auth(false),
            Message::SignUpPressed => self.start_auth(true),
            Message::SignInFinished(result) => {
                self.busy = None;
                match result {
                    Ok(session) => {
                        self.session = session;
                        self.auth_status.clear();
                        self.password.clear();
                        self.entries = self.library.list();
                        self.status = format!(
                            "✅ Login successful! {} images in library.",
                            self.entries.len()
                        );
                    }
                    Err(AuthError::Rejected(_)) => {
                        // Do not leak which part was wrong
                        self.auth_status =
                            "Login failed. Check your email or password.".to_string();
                    }
                    Err(e) => self.auth_status = format!("⚠️ {}", e),
                }
                Task::none()
            }
            Message::SignUpFinished(result) => {
                self.busy = None;
                self.auth_status = match result {
                    Ok(()) => "✅ Account created - sign in to continue.".to_string(),
                    Err(e) => format!("⚠️ Sign up failed: {}", e),
                };
                Task::none()
            }
            Message::SignOut => {
                self.session.sign_out();
                self.status = "Signed out.".to_string();
                Task::none()
            }

            // ----- Uploads -----
            Message::PickSource => self.pick_upload("Upload an image", Message::SourceLoaded),
            Message::SourceLoaded(result) => {
                match result {
                    Ok(upload) => {
                        let dimension = upload.image.dimension();
                        self.status = format!(
                            "Normalized {} to {}x{}.",
                            upload.filename, dimension, dimension
                        );
                        self.source = Some(upload);
                    }
                    Err(e) => self.report_error("Upload", &AppError::Canvas(e)),
                }
                Task::none()
            }
            Message::PickMixFirst => {
                self.pick_upload("Upload image 1 (e.g. a person)", Message::MixFirstLoaded)
            }
            Message::MixFirstLoaded(result) => {
                match result {
                    Ok(upload) => self.mix_first = Some(upload),
                    Err(e) => self.report_error("Upload", &AppError::Canvas(e)),
                }
                Task::none()
            }
            Message::PickMixSecond => {
                self.pick_upload("Upload image 2 (e.g. an object)", Message::MixSecondLoaded)
            }
            Message::MixSecondLoaded(result) => {
                match result {
                    Ok(upload) => self.mix_second = Some(upload),
                    Err(e) => self.report_error("Upload", &AppError::Canvas(e)),
                }
                Task::none()
            }

            // ----- Option widgets -----
            Message::StyleSelected(style) => {
                self.style = style;
                Task::none()
            }
            Message::CustomPromptChanged(prompt) => {
                self.custom_prompt = prompt;
                Task::none()
            }
            Message::BackgroundSelected(background) => {
                self.options.background = background;
                Task::none()
            }
            Message::QualitySelected(quality) => {
                self.options.quality = quality;
                Task::none()
            }
            Message::SizeSelected(size) => {
                self.options.size = size;
                Task::none()
            }
            Message::CountChanged(count) => {
                self.options.count = count;
                Task::none()
            }
            Message::UserChanged(user) => {
                self.options.user = user;
                Task::none()
            }
            Message::MixPromptChanged(prompt) => {
                self.mix_prompt = prompt;
                Task::none()
            }
            Message::GenerateTextChanged(prompt) => {
                self.generate_text = prompt;
                Task::none()
            }
            Message::GenerateStyleSelected(style) => {
                self.generate_style = style;
                Task::none()
            }

            // ----- Actions -----
            Message::StylizePressed => self.start_stylize(),
            Message::CombinePressed => self.start_combine(),
            Message::GeneratePressed => self.start_generate(),
            Message::CancelPressed => {
                if let Some(handle) = self.abort.take() {
                    handle.abort();
                    self.busy = None;
                    self.status = "Cancelled.".to_string();
                }
                Task::none()
            }
            Message::ActionFinished(kind, result) => {
                self.busy = None;
                self.abort = None;
                match result {
                    Ok(success) => self.finish_action(kind, success),
                    Err(e) => self.report_error(action_verb(kind), &e),
                }
                Task::none()
            }

            // ----- Library -----
            Message::DownloadEntry(filename) => {
                self.download_entry(&filename);
                Task::none()
            }
            Message::DeleteEntry(filename) => {
                match self.library.delete(&filename) {
                    Ok(()) => self.status = format!("🗑 Deleted {}.", filename),
                    Err(e) => self.report_error("Delete", &AppError::Library(e)),
                }
                self.entries = self.library.list();
                Task::none()
            }
            Message::RefreshLibrary => {
                self.entries = self.library.list();
                self.status = format!("{} images in library.", self.entries.len());
                Task::none()
            }
        }
    }

    /// Launch a sign-in or sign-up task against the identity provider
    fn start_auth(&mut self, sign_up: bool) -> Task<Message> {
        if self.busy.is_some() {
            return Task::none();
        }

        let email = self.email.trim().to_string();
        let password = self.password.clone();
        if email.is_empty() || password.is_empty() {
            self.auth_status = "Enter an email and a password.".to_string();
            return Task::none();
        }

        let Some((url, anon_key)) = self.config.identity() else {
            self.auth_status =
                "⚠️ Identity provider not configured (set SUPABASE_URL and SUPABASE_ANON_KEY)."
                    .to_string();
            return Task::none();
        };

        let client = AuthClient::new(url, anon_key);
        if sign_up {
            self.busy = Some("Signing up");
            self.auth_status = "Creating account...".to_string();
            Task::perform(
                async move { client.sign_up(&email, &password).await },
                Message::SignUpFinished,
            )
        } else {
            self.busy = Some("Signing in");
            self.auth_status = "Signing in...".to_string();
            Task::perform(
                async move { client.sign_in_with_password(&email, &password).await },
                Message::SignInFinished,
            )
        }
    }

    /// Show the native file picker and normalize the chosen image off-thread
    fn pick_upload(
        &mut self,
        title: &str,
        done: fn(Result<Upload, CanvasError>) -> Message,
    ) -> Task<Message> {
        if self.busy.is_some() {
            return Task::none();
        }

        let file = FileDialog::new()
            .set_title(title)
            .add_filter("Images", &["png", "jpg", "jpeg", "webp"])
            .pick_file();

        if let Some(path) = file {
            self.status = format!("Normalizing {}...", path.display());
            return Task::perform(load_upload(path), done);
        }

        Task::none()
    }

    fn start_stylize(&mut self) -> Task<Message> {
        if self.busy.is_some() {
            return Task::none();
        }
        let Some(images) = self
            .source
            .as_ref()
            .map(|upload| vec![upload.image.png_bytes().to_vec()])
        else {
            self.status = "Upload an image first.".to_string();
            return Task::none();
        };
        let Some(client) = self.generation_client() else {
            return Task::none();
        };

        let prompt = options::stylize_prompt(self.style, &self.custom_prompt);
        let options = self.options.clone();
        let library = self.library.clone();

        self.run_action(Kind::Styled, async move {
            let results = client.edit(images, &prompt, &options).await?;
            persist_results(&library, Kind::Styled, results)
        })
    }

    fn start_combine(&mut self) -> Task<Message> {
        if self.busy.is_some() {
            return Task::none();
        }
        let images = match (&self.mix_first, &self.mix_second) {
            (Some(first), Some(second)) => vec![
                first.image.png_bytes().to_vec(),
                second.image.png_bytes().to_vec(),
            ],
            _ => {
                self.status = "Please upload two images and enter a description.".to_string();
                return Task::none();
            }
        };
        if self.mix_prompt.trim().is_empty() {
            self.status = "Please upload two images and enter a description.".to_string();
            return Task::none();
        }
        let Some(client) = self.generation_client() else {
            return Task::none();
        };

        let prompt = self.mix_prompt.trim().to_string();
        // The combine contract is fixed: one square result, auto background/quality
        let options = GenerationOptions::default();
        let library = self.library.clone();

        self.run_action(Kind::Mixed, async move {
            let results = client.edit(images, &prompt, &options).await?;
            persist_results(&library, Kind::Mixed, results)
        })
    }

    fn start_generate(&mut self) -> Task<Message> {
        if self.busy.is_some() {
            return Task::none();
        }
        if self.generate_text.trim().is_empty() {
            self.status = "Describe the image you want to create.".to_string();
            return Task::none();
        }
        let Some(client) = self.generation_client() else {
            return Task::none();
        };

        let prompt = options::generate_prompt(&self.generate_text, self.generate_style);
        let options = GenerationOptions::default();
        let library = self.library.clone();

        self.run_action(Kind::Generated, async move {
            let results = client.generate(&prompt, &options).await?;
            persist_results(&library, Kind::Generated, results)
        })
    }

    /// Run one generation pipeline as an abortable background task.
    /// Only one action is in flight at a time.
    fn run_action(
        &mut self,
        kind: Kind,
        future: impl std::future::Future<Output = Result<ActionSuccess, AppError>> + Send + 'static,
    ) -> Task<Message> {
        self.busy = Some(action_verb(kind));
        self.status = format!("{}...", action_verb(kind));

        let (task, handle) =
            Task::perform(future, move |result| Message::ActionFinished(kind, result)).abortable();
        self.abort = Some(handle);
        task
    }

    /// Build the generation client, or explain what is missing
    fn generation_client(&mut self) -> Option<ImagesClient> {
        match self.config.generation_key() {
            Some(key) => Some(ImagesClient::new(key)),
            None => {
                self.status =
                    "⚠️ No generation API key configured (set OPENAI_API_KEY).".to_string();
                None
            }
        }
    }

    fn finish_action(&mut self, kind: Kind, success: ActionSuccess) {
        self.entries = self.library.list();
        self.status = format!(
            "✅ {} complete - stored {} image(s). {} in library.",
            action_verb(kind),
            success.entries.len(),
            self.entries.len()
        );

        // Side-by-side preview; the original column only applies to stylize
        let original = match kind {
            Kind::Styled => self.source.as_ref().map(|u| u.preview.clone()),
            _ => None,
        };
        let caption = success
            .entries
            .first()
            .map(|entry| entry.filename.clone())
            .unwrap_or_default();
        self.preview = Some(ResultPreview {
            original,
            result: picture::Handle::from_bytes(success.first_png),
            caption,
        });

        // Remember the last-used options across restarts
        self.config.options = Some(self.options.clone());
        if let Err(e) = self.config.save() {
            log::warn!("could not persist config: {}", e);
        }
    }

    /// Copy a library entry to a user-chosen location
    fn download_entry(&mut self, filename: &str) {
        let bytes = match self.library.read(filename) {
            Ok(bytes) => bytes,
            Err(e) => {
                self.report_error("Download", &AppError::Library(e));
                self.entries = self.library.list();
                return;
            }
        };

        let target = FileDialog::new()
            .set_title("Save image")
            .set_file_name(filename)
            .save_file();

        if let Some(path) = target {
            match std::fs::write(&path, &bytes) {
                Ok(()) => self.status = format!("⬇️ Saved {}.", path.display()),
                Err(e) => self.status = format!("⚠️ Could not save {}: {}", path.display(), e),
            }
        }
    }

    /// Map an error kind to its user-facing status message
    fn report_error(&mut self, action: &str, error: &AppError) {
        log::warn!("{} failed: {}", action, error);
        self.status = match error {
            AppError::Canvas(CanvasError::Decode(_)) => format!(
                "⚠️ {}: that file is not a readable image - try a different upload.",
                action
            ),
            AppError::Canvas(e) => format!("⚠️ {}: {}", action, e),
            AppError::Library(LibraryError::NotFound { filename }) => {
                format!("⚠️ {} is already gone.", filename)
            }
            AppError::Library(e) => format!("⚠️ Library problem: {}", e),
            AppError::Generation(GenerationError::Upstream(message)) => {
                format!("⚠️ {} failed: {}", action, message)
            }
            AppError::Generation(e) => format!("⚠️ {} failed: {}", action, e),
        };
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        if self.session.is_authenticated() {
            self.view_studio()
        } else {
            self.view_login()
        }
    }

    fn view_login(&self) -> Element<Message> {
        let busy = self.busy.is_some();

        let content = column![
            text("🎨 ArtifyAI").size(48),
            text("Sign in to continue").size(16),
            text_input("Email", &self.email)
                .on_input(Message::EmailChanged)
                .padding(10),
            text_input("Password", &self.password)
                .on_input(Message::PasswordChanged)
                .secure(true)
                .padding(10),
            row![
                button("Sign In")
                    .on_press_maybe((!busy).then_some(Message::SignInPressed))
                    .padding(10),
                button("Sign Up")
                    .on_press_maybe((!busy).then_some(Message::SignUpPressed))
                    .padding(10),
            ]
            .spacing(10),
            text(&self.auth_status).size(14),
        ]
        .spacing(20)
        .padding(40)
        .max_width(420)
        .align_x(Alignment::Center);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into()
    }

    fn view_studio(&self) -> Element<Message> {
        let busy = self.busy.is_some();

        let mut content = column![self.view_header()].spacing(24).padding(30).max_width(960);

        if self.preview.is_some() {
            content = content.push(self.view_preview());
        }

        content = content
            .push(horizontal_rule(2))
            .push(self.view_stylize(busy))
            .push(horizontal_rule(2))
            .push(self.view_mix(busy))
            .push(horizontal_rule(2))
            .push(self.view_generate(busy))
            .push(horizontal_rule(2))
            .push(self.view_library());

        scrollable(container(content).width(Length::Fill).center_x(Length::Fill)).into()
    }

    fn view_header(&self) -> Element<Message> {
        let account = self.session.email().unwrap_or("");

        let mut header = column![
            row![
                text("🎨 ArtifyAI").size(36),
                horizontal_space(),
                text(account).size(14),
                button("Sign Out").on_press(Message::SignOut).padding(6),
            ]
            .spacing(10)
            .align_y(Alignment::Center),
            text(&self.status).size(14),
        ]
        .spacing(8);

        if let Some(label) = self.busy {
            header = header.push(
                row![
                    text(format!("{}...", label)).size(14),
                    button("Cancel").on_press(Message::CancelPressed).padding(4),
                ]
                .spacing(10)
                .align_y(Alignment::Center),
            );
        }

        header.into()
    }

    fn view_preview(&self) -> Element<Message> {
        let Some(preview) = &self.preview else {
            return column![].into();
        };

        let mut images = row![].spacing(20);
        if let Some(original) = &preview.original {
            images = images.push(
                column![
                    picture(original.clone()).width(Length::Fixed(PREVIEW_WIDTH)),
                    text("Original").size(12),
                ]
                .spacing(4)
                .align_x(Alignment::Center),
            );
        }
        images = images.push(
            column![
                picture(preview.result.clone()).width(Length::Fixed(PREVIEW_WIDTH)),
                text(preview.caption.clone()).size(12),
            ]
            .spacing(4)
            .align_x(Alignment::Center),
        );

        column![text("Result Preview").size(24), images]
            .spacing(10)
            .into()
    }

    fn view_stylize(&self, busy: bool) -> Element<Message> {
        let mut panel: Column<Message> = column![
            text("Stylize an Upload").size(24),
            button("Upload Image (PNG, JPG, or WEBP)")
                .on_press_maybe((!busy).then_some(Message::PickSource))
                .padding(10),
        ]
        .spacing(10);

        if let Some(upload) = &self.source {
            panel = panel.push(picture(upload.preview.clone()).width(Length::Fixed(PREVIEW_WIDTH)));
            panel = panel.push(text(format!("{} (normalized)", upload.filename)).size(12));
        }

        let selectors = row![
            column![
                text("Visual style").size(14),
                pick_list(options::STYLE_PRESETS, Some(self.style), Message::StyleSelected),
            ]
            .spacing(5),
            column![
                text("Background").size(14),
                pick_list(
                    Background::ALL,
                    Some(self.options.background),
                    Message::BackgroundSelected
                ),
            ]
            .spacing(5),
            column![
                text("Image quality").size(14),
                pick_list(
                    Quality::ALL,
                    Some(self.options.quality),
                    Message::QualitySelected
                ),
            ]
            .spacing(5),
            column![
                text("Image size").size(14),
                pick_list(ImageSize::ALL, Some(self.options.size), Message::SizeSelected),
            ]
            .spacing(5),
        ]
        .spacing(15);

        panel = panel
            .push(
                text_input(
                    "Or type your own custom style prompt (optional)",
                    &self.custom_prompt,
                )
                .on_input(Message::CustomPromptChanged)
                .padding(8),
            )
            .push(selectors)
            .push(
                row![
                    text(format!("How many images? {}", self.options.count)).size(14),
                    slider(1..=10, self.options.count, Message::CountChanged)
                        .width(Length::Fixed(200.0)),
                ]
                .spacing(10)
                .align_y(Alignment::Center),
            )
            .push(
                text_input(
                    "Optional user id (for abuse monitoring)",
                    &self.options.user,
                )
                .on_input(Message::UserChanged)
                .padding(8),
            )
            .push(
                button("Stylize Image")
                    .on_press_maybe(
                        (!busy && self.source.is_some()).then_some(Message::StylizePressed),
                    )
                    .padding(10),
            );

        panel.into()
    }

    fn view_mix(&self, busy: bool) -> Element<Message> {
        let upload_column = |label: &'static str,
                             pick: Message,
                             upload: &Option<Upload>|
         -> Element<'static, Message> {
            let mut col: Column<Message> = column![button(label)
                .on_press_maybe((!busy).then_some(pick))
                .padding(10)]
            .spacing(8);
            if let Some(upload) = upload {
                col = col.push(picture(upload.preview.clone()).width(Length::Fixed(180.0)));
                col = col.push(text(upload.filename.clone()).size(12));
            }
            col.into()
        };

        column![
            text("🧪 Mix Two Uploaded Images").size(24),
            row![
                upload_column(
                    "Upload Image 1 (e.g. a person)",
                    Message::PickMixFirst,
                    &self.mix_first
                ),
                upload_column(
                    "Upload Image 2 (e.g. an object)",
                    Message::PickMixSecond,
                    &self.mix_second
                ),
            ]
            .spacing(20),
            text_input(
                "Describe how these two images should be combined, e.g. \"The woman is carrying the purse.\"",
                &self.mix_prompt,
            )
            .on_input(Message::MixPromptChanged)
            .padding(8),
            button("Combine Images")
                .on_press_maybe((!busy).then_some(Message::CombinePressed))
                .padding(10),
        ]
        .spacing(10)
        .into()
    }

    fn view_generate(&self, busy: bool) -> Element<Message> {
        column![
            text("🎨 Create an Image from Text Prompt").size(24),
            text_input(
                "Describe the image you want to create",
                &self.generate_text,
            )
            .on_input(Message::GenerateTextChanged)
            .padding(8),
            row![
                text("Visual style").size(14),
                pick_list(
                    options::GENERATE_STYLE_PRESETS,
                    Some(self.generate_style),
                    Message::GenerateStyleSelected
                ),
            ]
            .spacing(10)
            .align_y(Alignment::Center),
            button("Generate Image")
                .on_press_maybe(
                    (!busy && !self.generate_text.trim().is_empty())
                        .then_some(Message::GeneratePressed),
                )
                .padding(10),
        ]
        .spacing(10)
        .into()
    }

    fn view_library(&self) -> Element<Message> {
        let mut panel: Column<Message> = column![row![
            text("🖼 Your Image Library").size(24),
            horizontal_space(),
            button("Refresh").on_press(Message::RefreshLibrary).padding(6),
        ]
        .align_y(Alignment::Center)]
        .spacing(12);

        if self.entries.is_empty() {
            panel = panel.push(text("Your image library is empty.").size(14));
        } else {
            panel = panel.push(ui::gallery::library_grid(&self.entries));
        }

        panel.into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

/// Action label used in status messages
fn action_verb(kind: Kind) -> &'static str {
    match kind {
        Kind::Styled => "Stylize",
        Kind::Mixed => "Combine",
        Kind::Generated => "Generate",
    }
}

/// Read and normalize an upload off the UI thread
async fn load_upload(path: PathBuf) -> Result<Upload, CanvasError> {
    tokio::task::spawn_blocking(move || {
        let bytes = std::fs::read(&path)
            .map_err(|e| CanvasError::Decode(format!("could not read {}: {}", path.display(), e)))?;
        let image = canvas::normalize(&bytes, canvas::MAX_DIMENSION)?;
        let preview = picture::Handle::from_bytes(image.png_bytes().to_vec());
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();

        Ok(Upload {
            filename,
            image,
            preview,
        })
    })
    .await
    .map_err(|e| CanvasError::Decode(format!("task join error: {}", e)))?
}

/// Write every generated result to the library, keeping the first for preview
fn persist_results(
    library: &Library,
    kind: Kind,
    results: Vec<Vec<u8>>,
) -> Result<ActionSuccess, AppError> {
    let mut entries = Vec::with_capacity(results.len());
    for bytes in &results {
        entries.push(library.store(kind, bytes)?);
    }

    let first_png = results.into_iter().next().unwrap_or_default();
    Ok(ActionSuccess { entries, first_png })
}

fn main() -> iced::Result {
    env_logger::init();

    iced::application("ArtifyAI Studio", Artify::update, Artify::view)
        .theme(Artify::theme)
        .centered()
        .run_with(Artify::new)
}
