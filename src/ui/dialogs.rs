use gtk4::prelude::*;
use gtk4::{ApplicationWindow, Dialog, Label, ResponseType};

use crate::i18n::I18n;

fn pad_button(button: &gtk4::Widget) {
    button.set_margin_start(8);
    button.set_margin_end(8);
    button.set_margin_top(6);
    button.set_margin_bottom(6);
}

fn message_body(dialog: &Dialog, text: &str) {
    let content = dialog.content_area();
    content.set_margin_start(16);
    content.set_margin_end(16);
    content.set_margin_top(12);
    content.set_margin_bottom(12);
    let label = Label::new(Some(text));
    label.set_wrap(true);
    label.set_xalign(0.0);
    content.append(&label);
}

/// Ask before wiping the session statistics.
pub fn confirm_reset(parent: &ApplicationWindow, i18n: &I18n, on_confirm: impl Fn() + 'static) {
    let dialog = Dialog::new();
    dialog.set_transient_for(Some(parent));
    dialog.set_modal(true);
    dialog.set_destroy_with_parent(true);
    dialog.set_title(Some(&i18n.t("reset-title")));

    let ok_btn = dialog.add_button(&i18n.t("ok"), ResponseType::Accept);
    let cancel_btn = dialog.add_button(&i18n.t("cancel"), ResponseType::Cancel);
    pad_button(&ok_btn);
    pad_button(&cancel_btn);
    message_body(&dialog, &i18n.t("reset-message"));

    dialog.connect_response(move |dialog, response| {
        if response == ResponseType::Accept {
            on_confirm();
        }
        dialog.close();
    });

    dialog.show();
}

/// Show a plain-text message box with a single OK button.
pub fn show_info(parent: &ApplicationWindow, title: &str, message: &str, i18n: &I18n) {
    let dialog = Dialog::new();
    dialog.set_transient_for(Some(parent));
    dialog.set_modal(true);
    dialog.set_destroy_with_parent(true);
    dialog.set_title(Some(title));
    let ok_btn = dialog.add_button(&i18n.t("ok"), ResponseType::Accept);
    pad_button(&ok_btn);
    message_body(&dialog, message);

    dialog.connect_response(|dialog, _| {
        dialog.close();
    });

    dialog.show();
}
