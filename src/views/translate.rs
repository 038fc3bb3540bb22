use crate::dom::ensure_translation_font;
use crate::translate::{self, ArticleHost, LANGUAGES, TranslateControl, TranslationJob};
use crate::ui::WidgetServices;
use dioxus::prelude::*;

fn start_translation(
    mut control: Signal<TranslateControl>,
    services: Signal<WidgetServices>,
    job: TranslationJob,
) {
    let (article, backend) = {
        let services = services.read();
        (services.article.clone(), services.backend.clone())
    };

    spawn(async move {
        let outcome = translate::run(&article, backend.as_ref(), &job).await;
        let Some(markup) = control.with_mut(|c| c.finish(&job, outcome)) else {
            return;
        };
        if let Err(err) = article.write_markup(&markup).await {
            tracing::error!(error = %err, "could not swap in translated content");
            control.with_mut(|c| c.fail(&err));
        }
    });
}

fn revert_translation(mut control: Signal<TranslateControl>, services: Signal<WidgetServices>) {
    let Some(snapshot) = control.with_mut(TranslateControl::revert) else {
        return;
    };
    let article = services.read().article.clone();

    spawn(async move {
        if let Err(err) = article.write_markup(snapshot.markup()).await {
            tracing::error!(error = %err, "could not restore original content");
            control.with_mut(|c| c.fail(&err));
        }
    });
}

/// Language dropdown plus translate/revert button shown above the article.
#[component]
pub fn TranslateBar() -> Element {
    let services = use_context::<Signal<WidgetServices>>();
    let mut control = use_signal(TranslateControl::default);

    use_hook(ensure_translation_font);

    let state = control.read().clone();
    let loading = state.is_loading();

    rsx! {
        div { class: "tw-translate-bar",
            select {
                class: "tw-language",
                value: "{state.language()}",
                disabled: loading,
                onchange: move |ev| {
                    if let Some(job) = control.with_mut(|c| c.select_language(ev.value())) {
                        start_translation(control, services, job);
                    }
                },
                for lang in LANGUAGES.iter() {
                    option {
                        key: "{lang}",
                        value: "{lang}",
                        selected: *lang == state.language(),
                        "{lang}"
                    }
                }
            }
            button {
                class: "tw-translate-button",
                r#type: "button",
                disabled: loading,
                title: state.button_title(),
                onclick: move |_| {
                    if control.read().is_translated() {
                        revert_translation(control, services);
                    } else if let Some(job) = control.with_mut(TranslateControl::begin) {
                        start_translation(control, services, job);
                    }
                },
                "{state.button_label()}"
            }
            if let Some(error) = state.error() {
                span { class: "tw-translate-error", "{error}" }
            }
        }
    }
}
