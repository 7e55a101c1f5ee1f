use iced::keyboard::{self, Key};
use iced::mouse;
use iced::widget::{button, column, container, row, scrollable, stack, text};
use iced::{event, Element, Event, Length, Padding, Point, Size, Subscription, Task, Theme};
use std::sync::OnceLock;

use crate::bridge::{ActionOutcome, ClipboardTableBridge};
use crate::clipboard::SystemClipboard;
use crate::logger;
use crate::menu::{MenuAction, MenuPosition};
use crate::model::{CellRef, GridModel, TableModel};
use crate::settings::Settings;
use crate::view::{GridView, TableView};

/// Settings for the table window (set once before the event loop starts)
static TABLE_SETTINGS: OnceLock<Settings> = OnceLock::new();

/// Approximate glyph width used to turn character counts into pixels
const CHAR_WIDTH: f32 = 8.0;
const ROW_NUMBER_WIDTH: f32 = 44.0;

/// The spectra table window
pub struct SpectraTable {
    model: GridModel,
    view: GridView,
    bridge: ClipboardTableBridge<SystemClipboard>,
    cursor: Point,
    shift: bool,
    status_message: Option<String>,
}

impl SpectraTable {
    fn new(settings: &Settings) -> Self {
        let model = GridModel::new(settings.rows, settings.columns)
            .with_precision(settings.precision)
            .with_headers(settings.column_headers.clone());
        let mut view = GridView::new();
        view.resize_columns_to_contents(&model);
        view.resize_rows_to_contents(&model);

        let mut bridge =
            ClipboardTableBridge::new(SystemClipboard).with_copy_html(settings.copy_html);
        bridge.connect_pasted(|summary| {
            logger::log(&format!(
                "[DEBUG app] Pasted {} rows at ({}, {})",
                summary.rows, summary.top_left.row, summary.top_left.column
            ));
        });

        Self {
            model,
            view,
            bridge,
            cursor: Point::ORIGIN,
            shift: false,
            status_message: None,
        }
    }

    fn run_action(&mut self, action: MenuAction) {
        let outcome = self.bridge.trigger(action, &mut self.view, &mut self.model);
        // Notifications have no subscriber here; the whole grid is redrawn anyway
        self.model.take_events();

        self.status_message = Some(match outcome {
            ActionOutcome::Copied { cells } => format!("Copied {} cells", cells),
            ActionOutcome::Pasted(summary) => format!(
                "Pasted {} rows ({} new, {} values dropped)",
                summary.rows, summary.rows_inserted, summary.cells_skipped
            ),
            ActionOutcome::NothingToPaste => "Clipboard has nothing to paste".to_string(),
            ActionOutcome::Failed(reason) => format!("{:?} failed: {}", action, reason),
        });
    }
}

/// Messages for the table window
#[derive(Debug, Clone)]
pub enum Message {
    CellPressed(CellRef),
    RowHeaderPressed,
    Menu(MenuAction),
    Event(Event),
}

fn get_settings() -> Settings {
    TABLE_SETTINGS.get().cloned().unwrap_or_default()
}

fn update(state: &mut SpectraTable, message: Message) -> Task<Message> {
    match message {
        Message::CellPressed(cell) => {
            state.bridge.menu_mut().dismiss();
            if state.shift {
                state.view.extend_selection_to(cell);
            } else {
                state.view.select(cell);
            }
            Task::none()
        }
        Message::RowHeaderPressed => {
            // Pasting without a current cell anchors at the first row
            state.bridge.menu_mut().dismiss();
            state.view.clear_selection();
            Task::none()
        }
        Message::Menu(action) => {
            state.run_action(action);
            Task::none()
        }
        Message::Event(event) => {
            match event {
                Event::Mouse(mouse::Event::CursorMoved { position }) => {
                    state.cursor = position;
                }
                Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Right)) => {
                    state.bridge.context_menu_event(MenuPosition {
                        x: state.cursor.x,
                        y: state.cursor.y,
                    });
                }
                Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                    // Only uncaptured clicks get here, i.e. outside the menu
                    state.bridge.menu_mut().dismiss();
                }
                Event::Keyboard(keyboard::Event::ModifiersChanged(modifiers)) => {
                    state.shift = modifiers.shift();
                }
                Event::Keyboard(keyboard::Event::KeyPressed {
                    key: Key::Named(keyboard::key::Named::Escape),
                    ..
                }) => {
                    state.bridge.menu_mut().dismiss();
                }
                Event::Keyboard(keyboard::Event::KeyPressed { key, modifiers, .. }) => {
                    if let Key::Character(c) = key.as_ref() {
                        if let Some(action) =
                            state.bridge.menu().shortcut_action(c, modifiers.command())
                        {
                            logger::log(&format!("[DEBUG app] Shortcut {:?}", action));
                            state.run_action(action);
                        }
                    }
                }
                _ => {}
            }
            Task::none()
        }
    }
}

fn cell_style(selected: bool) -> fn(&Theme, button::Status) -> button::Style {
    if selected {
        button::primary
    } else {
        button::secondary
    }
}

fn table(state: &SpectraTable) -> Element<'_, Message> {
    let column_pixels =
        |column: usize| Length::Fixed(state.view.column_width(column) as f32 * CHAR_WIDTH + 16.0);

    let mut header = row![button(text("#").size(13))
        .width(Length::Fixed(ROW_NUMBER_WIDTH))
        .style(button::text)
        .on_press(Message::RowHeaderPressed)]
    .spacing(2);
    for c in 0..state.model.column_count() {
        header = header.push(
            container(text(state.model.header(c)).size(13))
                .width(column_pixels(c))
                .padding([2, 4]),
        );
    }

    let mut rows = column![header].spacing(2);
    for r in 0..state.model.row_count() {
        let mut cells = row![container(text((r + 1).to_string()).size(12))
            .width(Length::Fixed(ROW_NUMBER_WIDTH))
            .padding([2, 4])]
        .spacing(2);

        for c in 0..state.model.column_count() {
            let cell = CellRef::new(r, c);
            let lines = state.view.row_height(r) as f32;
            cells = cells.push(
                button(text(state.model.display_text(cell)).size(13))
                    .width(column_pixels(c))
                    .height(Length::Fixed(lines * 18.0 + 6.0))
                    .padding([2, 4])
                    .style(cell_style(state.view.is_selected(cell)))
                    .on_press(Message::CellPressed(cell)),
            );
        }
        rows = rows.push(cells);
    }

    scrollable(rows).height(Length::Fill).into()
}

fn context_menu(state: &SpectraTable) -> Option<Element<'_, Message>> {
    let position = state.bridge.menu().position()?;

    let mut entries = column![].spacing(2);
    for entry in state.bridge.menu().entries() {
        entries = entries.push(
            button(
                row![
                    text(entry.label).size(13).width(Length::Fixed(60.0)),
                    text(entry.shortcut.to_string()).size(11)
                ]
                .spacing(12),
            )
            .style(button::text)
            .padding([4, 10])
            .on_press(Message::Menu(entry.action)),
        );
    }

    let popup = container(entries).padding(4).style(container::rounded_box);
    Some(
        container(popup)
            .padding(Padding {
                top: position.y,
                right: 0.0,
                bottom: 0.0,
                left: position.x,
            })
            .into(),
    )
}

fn view(state: &SpectraTable) -> Element<'_, Message> {
    // Status message
    let status = if let Some(ref msg) = state.status_message {
        text(msg).size(12)
    } else {
        text("Right click or Ctrl+C / Ctrl+V to copy and paste").size(12)
    };

    let content = container(column![table(state), status].spacing(10).padding(10))
        .width(Length::Fill)
        .height(Length::Fill);

    match context_menu(state) {
        Some(menu) => stack![content, menu].into(),
        None => content.into(),
    }
}

fn subscription(_state: &SpectraTable) -> Subscription<Message> {
    event::listen().map(Message::Event)
}

/// Run the table window
pub fn run_table_gui(settings: Settings) -> iced::Result {
    // Store settings globally (OnceLock ensures thread-safe one-time initialization)
    let _ = TABLE_SETTINGS.set(settings);

    iced::application(
        || (SpectraTable::new(&get_settings()), Task::none()),
        update,
        view,
    )
    .title("Spectra Table")
    .subscription(subscription)
    .window_size(Size::new(480.0, 600.0))
    .run()
}
