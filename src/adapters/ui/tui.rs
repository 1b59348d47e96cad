//! Implements InputPort. Inquire-based interactive console.
//!
//! Viewer: email gate, then the grouped catalog with item details.
//! Admin: category and content management. Rejected operations are printed
//! and the menu comes back; the catalog is unchanged in that case.

use crate::domain::{CategoryGroup, ContentDraft, ContentId, ContentItem, DomainError, MediaType};
use crate::ports::{InputPort, MediaResolverPort};
use crate::usecases::{AccessService, CatalogView, CategoryService, ContentService, ViewerSession};
use async_trait::async_trait;
use inquire::error::InquireError;
use inquire::ui::{Color, RenderConfig, Styled};
use inquire::{Confirm, Select, Text};
use std::sync::Arc;

const BACK: &str = "« Back";

/// Red prompt prefix for every inquire prompt. Call once at startup.
pub fn apply_theme() {
    let config = RenderConfig::default()
        .with_prompt_prefix(Styled::new("▶").with_fg(Color::LightRed))
        .with_highlighted_option_prefix(Styled::new("›").with_fg(Color::LightRed));
    inquire::set_global_render_config(config);
}

/// `Ok(None)` when the user pressed Esc or Ctrl-C.
fn answered<T>(result: Result<T, InquireError>) -> Result<Option<T>, DomainError> {
    match result {
        Ok(v) => Ok(Some(v)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(DomainError::Ui(e.to_string())),
    }
}

/// Picks one of `labels`; returns its index.
fn pick(message: &str, labels: Vec<String>) -> Result<Option<usize>, DomainError> {
    Ok(answered(Select::new(message, labels).raw_prompt())?.map(|o| o.index))
}

fn media_label(kind: MediaType) -> &'static str {
    match kind {
        MediaType::Image => "[IMG]",
        MediaType::Gif => "[GIF]",
    }
}

fn item_label(item: &ContentItem) -> String {
    format!(
        "{} {} · {} ({})",
        media_label(item.media_type),
        item.title,
        item.category_name,
        item.id
    )
}

fn print_groups(groups: &[CategoryGroup]) {
    if groups.is_empty() {
        println!("\n  (catalog is empty)\n");
        return;
    }
    for group in groups {
        println!("\n{}", group.category);
        for item in &group.items {
            println!("  {} {}", media_label(item.media_type), item.title);
        }
    }
    println!();
}

fn print_details(item: &ContentItem) {
    println!("\n{}", item.title);
    println!("  {}", item.description);
    println!("  category:  {}", item.category_name);
    println!("  type:      {}", item.media_type);
    println!("  thumbnail: {}\n", item.thumbnail_ref);
}

/// TUI adapter. Inquire prompts.
pub struct TuiInputPort {
    access: Arc<AccessService>,
    categories: Arc<CategoryService>,
    content: Arc<ContentService>,
    view: Arc<CatalogView>,
    media: Arc<dyn MediaResolverPort>,
}

impl TuiInputPort {
    pub fn new(
        access: Arc<AccessService>,
        categories: Arc<CategoryService>,
        content: Arc<ContentService>,
        view: Arc<CatalogView>,
        media: Arc<dyn MediaResolverPort>,
    ) -> Self {
        Self {
            access,
            categories,
            content,
            view,
            media,
        }
    }

    async fn run_viewer(&self) -> Result<(), DomainError> {
        let Some(email) = answered(Text::new("Email:").prompt())? else {
            return Ok(());
        };
        let session = match self.access.sign_in(&email) {
            Ok(session) => session,
            Err(e) => {
                println!("✗ {}", e);
                return Ok(());
            }
        };
        self.browse(&session).await
    }

    async fn browse(&self, session: &ViewerSession) -> Result<(), DomainError> {
        println!("\nSigned in as {}", session.email);
        loop {
            let groups = self.view.grouped_content();
            print_groups(&groups);
            let items: Vec<ContentItem> = groups.into_iter().flat_map(|g| g.items).collect();
            let mut labels: Vec<String> = items.iter().map(item_label).collect();
            labels.push(BACK.to_string());

            let Some(idx) = pick("Open an item:", labels)? else {
                return Ok(());
            };
            let Some(item) = items.get(idx) else {
                return Ok(());
            };
            // Re-read: the item may have changed since the list was drawn.
            match self.view.get_content(&item.id) {
                Some(current) => {
                    print_details(&current);
                    self.offer_thumbnail(&current).await?;
                }
                None => println!("✗ item no longer exists"),
            }
        }
    }

    async fn offer_thumbnail(&self, item: &ContentItem) -> Result<(), DomainError> {
        let fetch = answered(
            Confirm::new("Fetch thumbnail?")
                .with_default(false)
                .prompt(),
        )?;
        if fetch == Some(true) {
            match self.media.resolve(&item.thumbnail_ref).await {
                Ok(bytes) => println!("✓ thumbnail available ({} bytes)", bytes.len()),
                Err(e) => println!("✗ {}", e),
            }
        }
        Ok(())
    }

    async fn run_admin(&self) -> Result<(), DomainError> {
        const ACTIONS: &[&str] = &[
            "List categories",
            "Show catalog",
            "Add category",
            "Delete category",
            "Add content",
            "Edit content",
            "Delete content",
            BACK,
        ];
        loop {
            let labels = ACTIONS.iter().map(|s| s.to_string()).collect();
            let Some(idx) = pick("Admin:", labels)? else {
                return Ok(());
            };
            let outcome = match ACTIONS[idx] {
                "List categories" => {
                    for (i, name) in self.view.list_categories().iter().enumerate() {
                        let count = self.view.filter_by_category(name).len();
                        println!("  {:>2}. {} ({} items)", i + 1, name, count);
                    }
                    Ok(())
                }
                "Show catalog" => {
                    print_groups(&self.view.grouped_content());
                    Ok(())
                }
                "Add category" => self.add_category(),
                "Delete category" => self.delete_category(),
                "Add content" => self.add_content(),
                "Edit content" => self.edit_content(),
                "Delete content" => self.delete_content(),
                _ => return Ok(()),
            };
            match outcome {
                Ok(()) => {}
                Err(e @ DomainError::Ui(_)) => return Err(e),
                Err(e) => println!("✗ {}", e),
            }
        }
    }

    fn add_category(&self) -> Result<(), DomainError> {
        let Some(name) = answered(Text::new("Category name:").prompt())? else {
            return Ok(());
        };
        let name = self.categories.add_category(&name)?;
        println!("✓ category '{}' added", name);
        Ok(())
    }

    fn delete_category(&self) -> Result<(), DomainError> {
        let Some(name) = self.choose_category("Delete which category?", None)? else {
            return Ok(());
        };
        let count = self.view.filter_by_category(&name).len();
        let prompt = format!("Delete '{}' and its {} item(s)?", name, count);
        if answered(Confirm::new(&prompt).with_default(false).prompt())? != Some(true) {
            return Ok(());
        }
        let removed = self.categories.delete_category(&name)?;
        println!("✓ category '{}' deleted ({} items removed)", name, removed.len());
        Ok(())
    }

    fn add_content(&self) -> Result<(), DomainError> {
        let Some(draft) = self.content_form(ContentDraft::default())? else {
            return Ok(());
        };
        let item = self.content.add_content(draft)?;
        println!("✓ content '{}' added ({})", item.title, item.id);
        Ok(())
    }

    fn edit_content(&self) -> Result<(), DomainError> {
        let Some(id) = self.choose_content("Edit which item?")? else {
            return Ok(());
        };
        let Some(current) = self.view.get_content(&id) else {
            return Err(DomainError::UnknownContent(id.to_string()));
        };
        let Some(draft) = self.content_form(ContentDraft::from_item(&current))? else {
            return Ok(());
        };
        let item = self.content.update_content(&id, draft)?;
        println!("✓ content '{}' updated", item.title);
        Ok(())
    }

    fn delete_content(&self) -> Result<(), DomainError> {
        let Some(id) = self.choose_content("Delete which item?")? else {
            return Ok(());
        };
        let removed = self.content.delete_content(&id)?;
        println!("✓ content '{}' deleted", removed.title);
        Ok(())
    }

    fn choose_category(
        &self,
        message: &str,
        current: Option<&str>,
    ) -> Result<Option<String>, DomainError> {
        let names = self.view.list_categories();
        if names.is_empty() {
            println!("  (no categories yet)");
            return Ok(None);
        }
        let start = current
            .and_then(|c| names.iter().position(|n| n == c))
            .unwrap_or(0);
        let choice = answered(
            Select::new(message, names.clone())
                .with_starting_cursor(start)
                .raw_prompt(),
        )?;
        Ok(choice.map(|o| names[o.index].clone()))
    }

    fn choose_content(&self, message: &str) -> Result<Option<ContentId>, DomainError> {
        let items = self.view.snapshot().items;
        if items.is_empty() {
            println!("  (no content yet)");
            return Ok(None);
        }
        let labels = items.iter().map(item_label).collect();
        Ok(pick(message, labels)?.map(|idx| items[idx].id.clone()))
    }

    /// Full content form, prefilled from `initial`. `None` if cancelled.
    fn content_form(&self, initial: ContentDraft) -> Result<Option<ContentDraft>, DomainError> {
        let Some(title) = answered(
            Text::new("Title:")
                .with_initial_value(&initial.title)
                .prompt(),
        )?
        else {
            return Ok(None);
        };
        let Some(description) = answered(
            Text::new("Description:")
                .with_initial_value(&initial.description)
                .prompt(),
        )?
        else {
            return Ok(None);
        };
        let Some(thumbnail_ref) = answered(
            Text::new("Thumbnail URL:")
                .with_initial_value(&initial.thumbnail_ref)
                .with_placeholder("https://example.com/image.jpg")
                .prompt(),
        )?
        else {
            return Ok(None);
        };
        let Some(category_name) =
            self.choose_category("Category:", Some(initial.category_name.as_str()))?
        else {
            return Ok(None);
        };
        let kinds = vec![MediaType::Image, MediaType::Gif];
        let start = usize::from(initial.media_type == Some(MediaType::Gif));
        let Some(media_type) = answered(
            Select::new("Type:", kinds)
                .with_starting_cursor(start)
                .prompt(),
        )?
        else {
            return Ok(None);
        };

        Ok(Some(
            ContentDraft::new(title, description, thumbnail_ref, category_name)
                .with_media_type(media_type),
        ))
    }
}

#[async_trait]
impl InputPort for TuiInputPort {
    async fn run(&self) -> Result<(), DomainError> {
        const MENU: &[&str] = &["Viewer", "Admin", "Quit"];
        loop {
            let labels = MENU.iter().map(|s| s.to_string()).collect();
            match pick("Main menu:", labels)? {
                Some(0) => self.run_viewer().await?,
                Some(1) => self.run_admin().await?,
                _ => return Ok(()),
            }
        }
    }
}
