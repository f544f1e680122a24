//! 命令执行器
//!
//! 把子命令转换为视图模型上的操作。每个命令返回要打印的行，
//! 提示消息留在 [`Toaster`](crate::notify::Toaster) 中由调用方统一输出。

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Result, bail};
use tracing::{debug, info};

use kazlearn_shared::dto::{ExportFormat, SortDirection};
use kazlearn_shared::i18n::Params;
use kazlearn_shared::models::{Category, GuideWordMapping, WordDetail, WordSummary};

use super::commands::{
    CategoryCommands, Commands, GuideCommands, ImageCommands, MoveDirection, PageArgs,
    SoundCommands, TranslationCommands, WordCommands, WordFilterArgs,
};
use crate::api::TokenStore;
use crate::delete::{DeleteState, DeleteWordFlow};
use crate::error::AdminError;
use crate::forms::{CategoryEditor, CategoryForm, TranslationEditor, WordEditor, WordForm};
use crate::media::{
    AudioSink, ImageManager, ImageMeta, LocalFile, LoggingSink, Playback, SoundManager, SoundMeta,
};
use crate::pages::{
    BulkDeleteStatus, BulkOutcome, CategoriesPage, GuideWordsPage, Pagination, SortState,
    WordFilters, WordsPage,
};
use crate::state::ConsoleState;

/// 命令执行器
pub struct CommandRunner {
    state: ConsoleState,
    tokens: TokenStore,
    sink: Arc<dyn AudioSink>,
}

impl CommandRunner {
    pub fn new(state: ConsoleState, tokens: TokenStore) -> Self {
        Self {
            state,
            tokens,
            sink: Arc::new(LoggingSink),
        }
    }

    /// 替换音频输出端
    pub fn with_sink(mut self, sink: Arc<dyn AudioSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn state(&self) -> &ConsoleState {
        &self.state
    }

    /// 执行命令，返回要打印的行
    pub async fn run(&self, command: Commands) -> Result<Vec<String>> {
        debug!(?command, "执行命令");
        match command {
            Commands::Login { token } => {
                self.tokens.save(&token)?;
                Ok(vec![self.state.t("auth.logged_in")])
            }
            Commands::Logout => {
                self.tokens.clear()?;
                Ok(vec![self.state.t("auth.logged_out")])
            }
            Commands::Words(cmd) => {
                self.require_token()?;
                self.run_words(cmd).await
            }
            Commands::Translations(cmd) => {
                self.require_token()?;
                self.run_translations(cmd).await
            }
            Commands::Categories(cmd) => {
                self.require_token()?;
                self.run_categories(cmd).await
            }
            Commands::Images(cmd) => {
                self.require_token()?;
                self.run_images(cmd).await
            }
            Commands::Sounds(cmd) => {
                self.require_token()?;
                self.run_sounds(cmd).await
            }
            Commands::Guides(cmd) => {
                self.require_token()?;
                self.run_guides(cmd).await
            }
        }
    }

    /// 把失败原因转换为可打印的行；表单校验错误逐字段列出
    pub fn describe_error(&self, err: &anyhow::Error) -> Vec<String> {
        match err.downcast_ref::<AdminError>() {
            Some(AdminError::Validation(fields)) => fields
                .iter()
                .map(|(field, error)| {
                    self.state.t_with(
                        "errors.field",
                        &Params::new()
                            .with("field", field)
                            .with("message", error.localized(&self.state.i18n)),
                    )
                })
                .collect(),
            Some(admin) => vec![admin.user_message(&self.state.i18n)],
            None => vec![format!("{:#}", err)],
        }
    }

    fn require_token(&self) -> Result<()> {
        if self.tokens.token().is_none() {
            bail!(self.state.t("auth.missing_token"));
        }
        Ok(())
    }

    /// 直接调用 API 时补发错误提示
    fn toasted<T>(&self, result: crate::Result<T>) -> Result<T> {
        result.map_err(|e| {
            self.state.toaster.error_from(&e);
            e.into()
        })
    }

    // ========== 单词 ==========

    async fn run_words(&self, cmd: WordCommands) -> Result<Vec<String>> {
        match cmd {
            WordCommands::List { filters, page } => {
                let mut view = WordsPage::new(self.state.clone())
                    .with_filters(word_filters(filters))
                    .with_sort(sort_state(&page, "kazakh_word"))
                    .with_pagination(self.pagination(&page));
                view.refresh().await?;
                Ok(self.word_rows(&view))
            }
            WordCommands::Search { query, page_size } => {
                let page_size = page_size.unwrap_or(self.state.settings.page_size);
                let mut view =
                    WordsPage::new(self.state.clone()).with_pagination(Pagination::new(page_size));
                view.apply_search(&query).await?;
                Ok(self.word_rows(&view))
            }
            WordCommands::Show { id } => {
                let language = self.state.settings.language_code.clone();
                let detail = self.toasted(
                    self.state
                        .words_api()
                        .get(id, Some(language.as_str()))
                        .await,
                )?;
                Ok(self.word_detail(&detail))
            }
            WordCommands::Create {
                kazakh_word,
                cyrillic,
                category,
                word_type,
                difficulty,
                translations,
            } => {
                let mut editor = WordEditor::open_create(self.state.clone()).await?;
                editor.form = WordForm {
                    kazakh_word,
                    kazakh_cyrillic: cyrillic,
                    category_id: category,
                    word_type_id: word_type,
                    difficulty_level_id: difficulty,
                    translations: Vec::new(),
                };
                for (code, text) in &translations {
                    editor.add_translation(code, text)?;
                }
                let report = editor.submit().await?;
                self.ensure_complete(report.failures().len(), report.steps.len())?;
                Ok(vec![self.saved_word(report.word.id, &report.word.kazakh_word)])
            }
            WordCommands::Update {
                id,
                word,
                cyrillic,
                category,
                word_type,
                difficulty,
                translations,
                remove_translations,
            } => {
                let mut editor = WordEditor::open_edit(self.state.clone(), id).await?;
                if let Some(word) = word {
                    editor.form.kazakh_word = word;
                }
                if cyrillic.is_some() {
                    editor.form.kazakh_cyrillic = cyrillic;
                }
                if category.is_some() {
                    editor.form.category_id = category;
                }
                if word_type.is_some() {
                    editor.form.word_type_id = word_type;
                }
                if difficulty.is_some() {
                    editor.form.difficulty_level_id = difficulty;
                }
                for code in &remove_translations {
                    editor.remove_translation(code);
                }
                for (code, text) in &translations {
                    match editor
                        .form
                        .translations
                        .iter_mut()
                        .find(|row| &row.language_code == code)
                    {
                        Some(row) => row.translation = text.clone(),
                        None => editor.add_translation(code, text)?,
                    }
                }
                let report = editor.submit().await?;
                self.ensure_complete(report.failures().len(), report.steps.len())?;
                Ok(vec![self.saved_word(report.word.id, &report.word.kazakh_word)])
            }
            WordCommands::Delete { id, force } => self.delete_word(id, force).await,
            WordCommands::BulkDelete { ids, force } => self.bulk_delete_words(&ids, force).await,
            WordCommands::Export {
                format,
                output,
                filters,
            } => {
                let format = ExportFormat::from(format);
                let view = WordsPage::new(self.state.clone()).with_filters(word_filters(filters));
                let bytes = self.toasted(view.export(format).await)?;
                let path = output
                    .unwrap_or_else(|| PathBuf::from(format!("words.{}", format.extension())));
                tokio::fs::write(&path, &bytes).await?;
                info!(path = %path.display(), bytes = bytes.len(), "导出完成");
                self.state.toaster.success(
                    "admin:words.exported",
                    &Params::new()
                        .with("bytes", bytes.len())
                        .with("path", path.display()),
                );
                Ok(Vec::new())
            }
        }
    }

    /// 先普通删除；被依赖记录阻止且指定了 `--force` 时强制删除
    async fn delete_word(&self, id: i64, force: bool) -> Result<Vec<String>> {
        let mut flow = DeleteWordFlow::new(self.state.clone());
        flow.request(id);
        let state = flow.confirm().await?.clone();
        match state {
            DeleteState::Blocked { .. } if force => {
                flow.set_force(true)?;
                flow.confirm().await?;
                Ok(Vec::new())
            }
            DeleteState::Blocked { .. } => bail!(self.state.t("admin:cli.force_hint")),
            _ => Ok(Vec::new()),
        }
    }

    async fn bulk_delete_words(&self, ids: &[i64], force: bool) -> Result<Vec<String>> {
        let mut view = WordsPage::new(self.state.clone());
        for id in ids {
            view.selection_mut().select(*id);
        }
        let outcome = match view.bulk_delete(false).await? {
            BulkDeleteStatus::Done(outcome) => outcome,
            BulkDeleteStatus::Blocked { .. } if force => match view.bulk_delete(true).await? {
                BulkDeleteStatus::Done(outcome) => outcome,
                BulkDeleteStatus::Blocked { detail } => bail!(detail),
            },
            BulkDeleteStatus::Blocked { .. } => bail!(self.state.t("admin:cli.force_hint")),
        };
        self.ensure_outcome(&outcome)?;
        Ok(Vec::new())
    }

    fn word_rows(&self, view: &WordsPage) -> Vec<String> {
        if view.rows().is_empty() {
            return vec![self.state.t("admin:words.empty")];
        }
        let mut lines: Vec<String> = view.rows().iter().map(|w| self.word_line(w)).collect();
        lines.push(self.page_summary(view.pagination(), view.total_pages(), view.total()));
        lines
    }

    fn word_line(&self, word: &WordSummary) -> String {
        let badge = self.state.t_with(
            "admin:words.translation_badge",
            &Params::new().count(word.translation_count.max(0) as u64),
        );
        self.state.t_with(
            "admin:cli.word_line",
            &Params::new()
                .with("id", word.id)
                .with("word", &word.kazakh_word)
                .with("translation", word.primary_translation.as_deref().unwrap_or("-"))
                .with("category", word.category_name.as_deref().unwrap_or("-"))
                .with("badge", badge),
        )
    }

    fn word_detail(&self, detail: &WordDetail) -> Vec<String> {
        let word = &detail.word;
        let mut lines = vec![self.state.t_with(
            "admin:cli.detail_title",
            &Params::new().with("id", word.id).with("word", &word.kazakh_word),
        )];
        if let Some(cyrillic) = &word.kazakh_cyrillic {
            lines.push(
                self.state
                    .t_with("admin:cli.detail_cyrillic", &Params::new().with("value", cyrillic)),
            );
        }
        lines.push(self.state.t_with(
            "admin:cli.detail_category",
            &Params::new().with(
                "name",
                detail
                    .category_name
                    .clone()
                    .unwrap_or_else(|| word.category_id.to_string()),
            ),
        ));
        lines.push(self.state.t_with(
            "admin:cli.detail_type",
            &Params::new().with(
                "name",
                detail
                    .word_type_name
                    .clone()
                    .unwrap_or_else(|| word.word_type_id.to_string()),
            ),
        ));
        lines.push(self.state.t_with(
            "admin:cli.detail_difficulty",
            &Params::new().with("id", word.difficulty_level_id),
        ));
        if !detail.translations.is_empty() {
            lines.push(self.state.t("admin:cli.detail_translations"));
            for t in &detail.translations {
                let params = Params::new()
                    .with("id", t.id)
                    .with("language", &t.language_code)
                    .with("text", &t.translation);
                let line = if t.alternative_translations.is_empty() {
                    self.state.t_with("admin:cli.translation_line", &params)
                } else {
                    self.state.t_with(
                        "admin:cli.translation_alternatives",
                        &params.with("alternatives", t.alternative_translations.join(", ")),
                    )
                };
                lines.push(line);
            }
        }
        lines.push(self.state.t_with(
            "admin:cli.detail_media",
            &Params::new()
                .with("images", detail.images.len())
                .with("sounds", detail.sounds.len()),
        ));
        lines
    }

    fn saved_word(&self, id: i64, word: &str) -> String {
        self.state.t_with(
            "admin:cli.word_saved",
            &Params::new().with("id", id).with("word", word),
        )
    }

    // ========== 译文 ==========

    async fn run_translations(&self, cmd: TranslationCommands) -> Result<Vec<String>> {
        match cmd {
            TranslationCommands::Add {
                word_id,
                language,
                text,
                alternatives,
            } => {
                let mut editor = TranslationEditor::open_new(self.state.clone(), word_id).await?;
                editor.choose_language(&language)?;
                editor.row.translation = text;
                editor.row.alternative_translations = alternatives;
                let saved = editor.submit().await?;
                Ok(vec![self.state.t_with(
                    "admin:cli.translation_line",
                    &Params::new()
                        .with("id", saved.id)
                        .with("language", &saved.language_code)
                        .with("text", &saved.translation),
                )])
            }
            TranslationCommands::Update {
                word_id,
                translation_id,
                text,
                alternatives,
            } => {
                let detail = self.toasted(self.state.words_api().get(word_id, None).await)?;
                let existing = detail
                    .translations
                    .into_iter()
                    .find(|t| t.id == translation_id)
                    .ok_or_else(|| {
                        AdminError::InvalidState(format!(
                            "translation {translation_id} does not belong to word {word_id}"
                        ))
                    })?;
                let mut editor = TranslationEditor::open_existing(self.state.clone(), existing).await?;
                editor.row.translation = text;
                if !alternatives.is_empty() {
                    editor.row.alternative_translations = alternatives;
                }
                editor.submit().await?;
                Ok(Vec::new())
            }
            TranslationCommands::Delete { id } => {
                match self.state.admin_api().delete_translation(id).await {
                    Ok(()) => {
                        self.state
                            .toaster
                            .success("admin:translations.deleted", &Params::new());
                        Ok(Vec::new())
                    }
                    Err(e) => {
                        self.state.toaster.error(
                            "admin:translations.delete_failed",
                            &Params::new().with("id", id).with("detail", e.detail()),
                        );
                        Err(e.into())
                    }
                }
            }
        }
    }

    // ========== 分类 ==========

    async fn run_categories(&self, cmd: CategoryCommands) -> Result<Vec<String>> {
        match cmd {
            CategoryCommands::List {
                search,
                active_only,
                page,
            } => {
                let mut view = CategoriesPage::new(self.state.clone())
                    .with_search(search.as_deref().unwrap_or_default())
                    .with_active_only(active_only)
                    .with_sort(sort_state(&page, "category_name"))
                    .with_pagination(self.pagination(&page));
                view.refresh().await?;
                if view.rows().is_empty() {
                    return Ok(vec![self.state.t("admin:categories.empty")]);
                }
                let mut lines: Vec<String> =
                    view.rows().iter().map(|c| self.category_line(c)).collect();
                lines.push(self.page_summary(view.pagination(), view.total_pages(), view.total()));
                Ok(lines)
            }
            CategoryCommands::Show { id } => {
                let category = self.toasted(self.state.admin_api().category(id).await)?;
                let mut lines = vec![self.category_line(&category)];
                lines.extend(category.translations.iter().map(|t| {
                    self.state.t_with(
                        "admin:cli.category_translation",
                        &Params::new()
                            .with("language", &t.language_code)
                            .with("name", &t.translated_name),
                    )
                }));
                Ok(lines)
            }
            CategoryCommands::Create {
                name,
                description,
                inactive,
                translations,
            } => {
                let mut editor = CategoryEditor::open_create(self.state.clone()).await?;
                let mut form = CategoryForm::new(&name);
                if let Some(description) = &description {
                    form = form.description(description);
                }
                form.is_active = !inactive;
                editor.form = form;
                for (code, translated) in &translations {
                    editor.set_translation(code, translated)?;
                }
                let category = editor.submit().await?;
                Ok(vec![self.category_line(&category)])
            }
            CategoryCommands::Update {
                id,
                name,
                description,
                translations,
            } => {
                let mut editor = CategoryEditor::open_edit(self.state.clone(), id).await?;
                if let Some(name) = name {
                    editor.form.category_name = name;
                }
                if description.is_some() {
                    editor.form.description = description;
                }
                for (code, translated) in &translations {
                    editor.set_translation(code, translated)?;
                }
                let category = editor.submit().await?;
                Ok(vec![self.category_line(&category)])
            }
            CategoryCommands::Activate { ids } => self.set_categories_active(&ids, true).await,
            CategoryCommands::Deactivate { ids } => self.set_categories_active(&ids, false).await,
            CategoryCommands::Delete { ids } => {
                let mut view = CategoriesPage::new(self.state.clone());
                view.selection_mut().select_all(ids.iter().copied());
                let outcome = view.bulk_delete().await?;
                self.ensure_outcome(&outcome)?;
                Ok(Vec::new())
            }
        }
    }

    async fn set_categories_active(&self, ids: &[i64], is_active: bool) -> Result<Vec<String>> {
        let mut view = CategoriesPage::new(self.state.clone());
        if let [id] = ids {
            view.set_status(*id, is_active).await?;
        } else {
            view.selection_mut().select_all(ids.iter().copied());
            view.bulk_set_active(is_active).await?;
        }
        Ok(Vec::new())
    }

    fn category_line(&self, category: &Category) -> String {
        let status = if category.is_active {
            self.state.t("status.active")
        } else {
            self.state.t("status.inactive")
        };
        self.state.t_with(
            "admin:cli.category_line",
            &Params::new()
                .with("id", category.id)
                .with("name", category.display_name(&self.state.settings.language_code))
                .with("status", status)
                .with("count", category.word_count),
        )
    }

    // ========== 媒体 ==========

    async fn run_images(&self, cmd: ImageCommands) -> Result<Vec<String>> {
        match cmd {
            ImageCommands::List { word_id } => {
                let mut manager = ImageManager::new(self.state.clone(), word_id);
                manager.load().await?;
                if manager.images().is_empty() {
                    return Ok(vec![self.state.t("admin:media.empty")]);
                }
                Ok(manager
                    .images()
                    .iter()
                    .map(|img| self.image_line(img.id, &img.image_url, img.is_primary))
                    .collect())
            }
            ImageCommands::Upload {
                word_id,
                file,
                mime,
                alt_text,
                primary,
                source,
                license,
            } => {
                let file = LocalFile::read(&file, mime.as_deref()).await?;
                let meta = ImageMeta {
                    alt_text,
                    is_primary: primary,
                    source,
                    license,
                };
                let mut manager = ImageManager::new(self.state.clone(), word_id);
                let image = manager.upload(file, meta).await?;
                Ok(vec![self.image_line(image.id, &image.image_url, image.is_primary)])
            }
            ImageCommands::Delete { word_id, image_id } => {
                ImageManager::new(self.state.clone(), word_id)
                    .delete(image_id)
                    .await?;
                Ok(Vec::new())
            }
            ImageCommands::Primary { word_id, image_id } => {
                let mut manager = ImageManager::new(self.state.clone(), word_id);
                manager.load().await?;
                manager.set_primary(image_id).await?;
                Ok(Vec::new())
            }
        }
    }

    fn image_line(&self, id: i64, url: &str, primary: bool) -> String {
        let key = if primary {
            "admin:cli.image_line_primary"
        } else {
            "admin:cli.image_line"
        };
        self.state
            .t_with(key, &Params::new().with("id", id).with("url", url))
    }

    async fn run_sounds(&self, cmd: SoundCommands) -> Result<Vec<String>> {
        match cmd {
            SoundCommands::List { word_id } => {
                let mut manager = SoundManager::new(self.state.clone(), word_id);
                manager.load().await?;
                if manager.sounds().is_empty() {
                    return Ok(vec![self.state.t("admin:media.empty")]);
                }
                Ok(manager
                    .sounds()
                    .iter()
                    .map(|s| self.sound_line(s.id, &s.sound_url, s.sound_type.as_deref()))
                    .collect())
            }
            SoundCommands::Upload {
                word_id,
                file,
                mime,
                sound_type,
                alt_text,
                source,
                license,
            } => {
                let file = LocalFile::read(&file, mime.as_deref()).await?;
                let meta = SoundMeta {
                    sound_type,
                    alt_text,
                    source,
                    license,
                };
                let mut manager = SoundManager::new(self.state.clone(), word_id);
                let sound = manager.upload(file, meta).await?;
                Ok(vec![self.sound_line(
                    sound.id,
                    &sound.sound_url,
                    sound.sound_type.as_deref(),
                )])
            }
            SoundCommands::Delete { word_id, sound_id } => {
                SoundManager::new(self.state.clone(), word_id)
                    .delete(sound_id)
                    .await?;
                Ok(Vec::new())
            }
            SoundCommands::Play { word_id, sound_id } => {
                let mut manager = SoundManager::new(self.state.clone(), word_id);
                manager.load().await?;
                let url = manager
                    .get(sound_id)
                    .map(|s| s.sound_url.clone())
                    .ok_or_else(|| {
                        AdminError::InvalidState(format!(
                            "sound {sound_id} does not belong to word {word_id}"
                        ))
                    })?;
                let mut playback = Playback::new(self.sink.clone());
                playback.play(&url)?;
                self.state
                    .toaster
                    .info("admin:media.playing", &Params::new().with("url", &url));
                Ok(Vec::new())
            }
        }
    }

    fn sound_line(&self, id: i64, url: &str, sound_type: Option<&str>) -> String {
        self.state.t_with(
            "admin:cli.sound_line",
            &Params::new()
                .with("id", id)
                .with("url", url)
                .with("type", sound_type.unwrap_or("-")),
        )
    }

    // ========== 学习指南 ==========

    async fn run_guides(&self, cmd: GuideCommands) -> Result<Vec<String>> {
        match cmd {
            GuideCommands::List => {
                let guides = self.toasted(self.state.guides_api().list().await)?;
                Ok(guides
                    .iter()
                    .map(|g| {
                        self.state.t_with(
                            "admin:cli.guide_line",
                            &Params::new()
                                .with("id", g.id)
                                .with("key", &g.guide_key)
                                .with("title", &g.title)
                                .with("count", g.word_count),
                        )
                    })
                    .collect())
            }
            GuideCommands::Words { guide_id } => {
                let mut view = GuideWordsPage::new(self.state.clone(), guide_id);
                view.mount().await?;
                Ok(self.mapping_rows(view.rows()))
            }
            GuideCommands::Add {
                guide_id,
                word_ids,
                importance,
            } => {
                let mut view = GuideWordsPage::new(self.state.clone(), guide_id);
                view.add_words(&word_ids, importance).await?;
                Ok(self.mapping_rows(view.rows()))
            }
            GuideCommands::Remove { guide_id, word_ids } => {
                let mut view = GuideWordsPage::new(self.state.clone(), guide_id);
                view.selection_mut().select_all(word_ids.iter().copied());
                let outcome = view.remove_selected().await?;
                self.ensure_outcome(&outcome)?;
                Ok(Vec::new())
            }
            GuideCommands::Move {
                guide_id,
                word_id,
                direction,
            } => {
                let mut view = GuideWordsPage::new(self.state.clone(), guide_id);
                view.mount().await?;
                match direction {
                    MoveDirection::Up => view.move_up(word_id).await?,
                    MoveDirection::Down => view.move_down(word_id).await?,
                }
                Ok(self.mapping_rows(view.rows()))
            }
        }
    }

    fn mapping_rows(&self, rows: &[GuideWordMapping]) -> Vec<String> {
        if rows.is_empty() {
            return vec![self.state.t("admin:guides.empty")];
        }
        rows.iter()
            .map(|m| {
                self.state.t_with(
                    "admin:cli.mapping_line",
                    &Params::new()
                        .with("order", m.order_in_guide)
                        .with("word_id", m.word_id)
                        .with("word", m.kazakh_word.as_deref().unwrap_or("-"))
                        .with("importance", m.importance_score),
                )
            })
            .collect()
    }

    // ========== 通用 ==========

    fn pagination(&self, args: &PageArgs) -> Pagination {
        let mut pagination =
            Pagination::new(args.page_size.unwrap_or(self.state.settings.page_size));
        pagination.page = args.page.max(1);
        pagination
    }

    fn page_summary(&self, pagination: Pagination, total_pages: i64, total: i64) -> String {
        self.state.t_with(
            "pagination.summary",
            &Params::new()
                .with("page", pagination.page)
                .with("total_pages", total_pages)
                .with("total", total),
        )
    }

    fn ensure_outcome(&self, outcome: &BulkOutcome) -> Result<()> {
        self.ensure_complete(
            outcome.failed.len(),
            outcome.failed.len() + outcome.succeeded.len(),
        )
    }

    fn ensure_complete(&self, failed: usize, total: usize) -> Result<()> {
        if failed > 0 {
            bail!(self.state.t_with(
                "admin:cli.incomplete",
                &Params::new().with("failed", failed).with("total", total),
            ));
        }
        Ok(())
    }
}

fn word_filters(args: WordFilterArgs) -> WordFilters {
    let filters = match &args.search {
        Some(search) => WordFilters::default().search(search),
        None => WordFilters::default(),
    };
    filters
        .category(args.category)
        .word_type(args.word_type)
        .difficulty(args.difficulty)
}

fn sort_state(args: &PageArgs, default_column: &str) -> SortState {
    SortState {
        column: args
            .sort_by
            .clone()
            .unwrap_or_else(|| default_column.to_string()),
        direction: if args.desc {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        },
    }
}
