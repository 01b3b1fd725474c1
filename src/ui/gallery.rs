use iced::widget::image as picture;
use iced::widget::{button, column, row, text};
use iced::{Element, Length};
use iced_aw::Wrap;

use crate::state::data::LibraryEntry;
use crate::Message;

/// Width of grid thumbnails
const THUMBNAIL_WIDTH: f32 = 150.0;

/// The thumbnail grid of the result library.
///
/// Tiles wrap to the available width; each carries its own download and
/// delete actions keyed by filename.
pub fn library_grid(entries: &[LibraryEntry]) -> Element<'static, Message> {
    let tiles: Vec<Element<'static, Message>> = entries.iter().map(entry_tile).collect();

    Wrap::with_elements(tiles)
        .spacing(12.0)
        .line_spacing(12.0)
        .into()
}

fn entry_tile(entry: &LibraryEntry) -> Element<'static, Message> {
    // Handle::from_path decodes lazily, so listing a large library stays cheap
    let thumbnail = picture(picture::Handle::from_path(&entry.path))
        .width(Length::Fixed(THUMBNAIL_WIDTH));

    let actions = row![
        button(text("⬇ Download").size(12))
            .on_press(Message::DownloadEntry(entry.filename.clone()))
            .padding(4),
        button(text("🗑 Delete").size(12))
            .on_press(Message::DeleteEntry(entry.filename.clone()))
            .padding(4),
    ]
    .spacing(5);

    let mut tile = column![thumbnail, text(entry.filename.clone()).size(12)].spacing(4);

    if let Some(created_at) = entry.created_at {
        tile = tile.push(text(created_at.format("%Y-%m-%d %H:%M").to_string()).size(10));
    }

    tile.push(actions).into()
}
