// SPDX-License-Identifier: GPL-3.0-only

//! Bubble view
//!
//! Renders the live feed clipped to a circle (corner radius = width / 2),
//! with the right-click menu as an overlay and the permission-denied
//! dialog built here for the application's dialog slot.

use crate::app::state::{AppModel, Message};
use crate::app::surface::BubbleSurface;
use crate::constants::ui;
use crate::fl;
use cosmic::Element;
use cosmic::iced::{Alignment, Background, Border, Color, Length};
use cosmic::widget;

impl AppModel {
    /// Build the main bubble view.
    pub fn view(&self) -> Element<'_, Message> {
        let radius = self.geometry.side / 2.0;

        // The feed fills the square window and is masked to a circle via
        // corner radius; until frames arrive the bubble is a blank disc
        let feed: Element<'_, Message> = match &self.current_frame {
            Some(handle) => widget::image::Image::new(handle.clone())
                .width(Length::Fill)
                .height(Length::Fill)
                .content_fit(cosmic::iced::ContentFit::Cover)
                .border_radius([radius; 4])
                .into(),
            None => widget::container(widget::Space::new(Length::Fill, Length::Fill))
                .width(Length::Fill)
                .height(Length::Fill)
                .style(move |_theme| blank_bubble_style(radius))
                .into(),
        };

        let bubble: Element<'_, Message> = BubbleSurface::new(feed).into();

        if self.menu.visible {
            cosmic::iced::widget::stack![bubble, self.build_context_menu()]
                .width(Length::Fill)
                .height(Length::Fill)
                .into()
        } else {
            bubble
        }
    }

    /// Build the right-click menu overlay.
    ///
    /// Rebuilt from the enumeration snapshot taken when the menu opened:
    /// a camera section with a checkmark on the active device, the mirror
    /// toggle, and quit.
    fn build_context_menu(&self) -> Element<'_, Message> {
        let spacing = cosmic::theme::spacing();
        let current = self.manager.current_device();

        let mut column = widget::column()
            .spacing(spacing.space_xxs)
            .padding(spacing.space_xs)
            .width(Length::Shrink);

        column = column.push(widget::text::heading(fl!("camera")));

        if self.menu.devices.is_empty() {
            column = column.push(widget::text::caption(fl!("no-cameras")));
        }

        for device in &self.menu.devices {
            let active = current.as_ref() == Some(device);
            column = column.push(menu_row(
                device.name.clone(),
                active,
                Message::SelectDevice(device.clone()),
            ));
        }

        column = column.push(widget::divider::horizontal::default());
        column = column.push(menu_row(
            fl!("mirror"),
            self.manager.is_mirrored(),
            Message::ToggleMirror,
        ));

        column = column.push(widget::divider::horizontal::default());
        column = column.push(menu_row(fl!("quit"), false, Message::Quit));

        // Panel swallows clicks; anywhere outside closes the menu
        let panel = widget::mouse_area(
            widget::container(column)
                .style(menu_panel_style)
                .width(Length::Fixed(ui::MENU_PANEL_WIDTH)),
        )
        .on_press(Message::Noop);

        widget::mouse_area(
            widget::container(panel)
                .width(Length::Fill)
                .height(Length::Fill)
                .align_x(Alignment::Center)
                .align_y(Alignment::Center),
        )
        .on_press(Message::CloseContextMenu)
        .into()
    }

    /// Build the permission-denied dialog.
    pub fn build_denial_dialog(&self) -> Element<'_, Message> {
        widget::dialog()
            .title(fl!("permission-title"))
            .body(fl!("permission-body"))
            .primary_action(
                widget::button::suggested(fl!("open-settings")).on_press(Message::OpenSettings),
            )
            .secondary_action(widget::button::standard(fl!("quit")).on_press(Message::Quit))
            .into()
    }
}

/// A single menu entry with a leading checkmark slot.
fn menu_row<'a>(label: String, checked: bool, message: Message) -> Element<'a, Message> {
    let spacing = cosmic::theme::spacing();

    let indicator: Element<'a, Message> = if checked {
        widget::icon::from_name("object-select-symbolic")
            .size(16)
            .into()
    } else {
        widget::Space::new(Length::Fixed(16.0), Length::Fixed(16.0)).into()
    };

    widget::button::custom(
        widget::row()
            .push(indicator)
            .push(widget::text::body(label))
            .spacing(spacing.space_xs)
            .align_y(Alignment::Center),
    )
    .class(cosmic::theme::Button::MenuItem)
    .width(Length::Fill)
    .on_press(message)
    .into()
}

/// Container style for the menu panel background
fn menu_panel_style(theme: &cosmic::Theme) -> widget::container::Style {
    let cosmic = theme.cosmic();
    let bg = cosmic.bg_color();
    widget::container::Style {
        background: Some(Background::Color(Color::from_rgba(
            bg.red,
            bg.green,
            bg.blue,
            ui::OVERLAY_BACKGROUND_ALPHA,
        ))),
        border: Border {
            radius: cosmic.corner_radii.radius_s.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Container style for the blank bubble shown before frames arrive
fn blank_bubble_style(radius: f32) -> widget::container::Style {
    widget::container::Style {
        background: Some(Background::Color(Color::BLACK)),
        border: Border {
            radius: radius.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}
