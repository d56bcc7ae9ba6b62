//! The signed-in user's own profile: details, avatar upload and profile fields.

use crate::components::avatar::Avatar;
use crate::components::status::{Flash, StatusLine};
use crate::context::use_app_context;
use crate::hooks::use_request_sequence;
use crate::i18n::{fmt_date, t};
use crate::pages::bind_input;
use magmon_core::FilePart;
use magmon_core::actions::profile;
use magmon_core::model::OwnProfile;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

const ACCEPTED_IMAGES: &str = "image/png, image/jpeg, image/gif";

#[derive(Properties, PartialEq, Clone)]
pub struct ProfileSummaryProps {
    pub profile: OwnProfile,
}

#[function_component(ProfileSummary)]
pub fn profile_summary(props: &ProfileSummaryProps) -> Html {
    let profile = &props.profile;
    let field = |label: &str, value: String| {
        html! { <p><strong>{ format!("{}: ", t(label)) }</strong>{ value }</p> }
    };
    html! {
        <div class="profile-summary">
            { field("profile.username", profile.username.clone()) }
            { field("profile.email", profile.email.clone().unwrap_or_else(|| t("common.na"))) }
            { field(
                "profile.registered",
                profile.registered_on.as_deref().map_or_else(|| t("common.na"), fmt_date),
            ) }
            <p>
                <strong>{ format!("{}: ", t("profile.avatar")) }</strong>
                if profile.avatar_url.is_some() {
                    <Avatar url={profile.avatar_url.clone()} alt={AttrValue::from(t("profile.avatar"))} size={100} />
                } else {
                    { t("profile.avatar_unset") }
                }
            </p>
        </div>
    }
}

/// Read the chosen file into an upload part.
async fn file_part(file: Option<web_sys::File>) -> Result<Option<FilePart>, String> {
    let Some(file) = file else {
        return Ok(None);
    };
    let file = gloo::file::File::from(file);
    let bytes = gloo::file::futures::read_as_bytes(&file)
        .await
        .map_err(|err| err.to_string())?;
    Ok(Some(FilePart {
        field: String::new(),
        file_name: file.name(),
        content_type: file.raw_mime_type(),
        bytes,
    }))
}

#[function_component(ProfilePage)]
pub fn profile_page() -> Html {
    let ctx = use_app_context();
    let seq = use_request_sequence();
    let profile_state = use_state(|| None::<OwnProfile>);
    let loading = use_state(|| true);
    let load_flash = use_state(|| None::<Flash>);

    let favorite_color = use_state(String::new);
    let retirement_plane = use_state(String::new);
    let saving = use_state(|| false);
    let save_flash = use_state(|| None::<Flash>);

    let file_input = use_node_ref();
    let selected = use_state(|| None::<web_sys::File>);
    let uploading = use_state(|| false);
    let upload_flash = use_state(|| None::<Flash>);

    // Sync the fields and the session's avatar with a freshly loaded profile.
    let apply = {
        let api = Rc::clone(&ctx.api);
        let (profile_state, favorite_color, retirement_plane) = (
            profile_state.clone(),
            favorite_color.clone(),
            retirement_plane.clone(),
        );
        Callback::from(move |loaded: OwnProfile| {
            favorite_color.set(loaded.favorite_color.clone().unwrap_or_default());
            retirement_plane.set(loaded.retirement_plane.clone().unwrap_or_default());
            if let Some(user) = api.session().current_user()
                && user.id == loaded.id
                && user.avatar_url != loaded.avatar_url
            {
                api.session().replace_user(magmon_core::model::User {
                    avatar_url: loaded.avatar_url.clone(),
                    ..user
                });
            }
            profile_state.set(Some(loaded));
        })
    };

    {
        let api = Rc::clone(&ctx.api);
        let seq = Rc::clone(&seq);
        let (loading, load_flash, apply) = (loading.clone(), load_flash.clone(), apply.clone());
        use_effect_with((), move |()| {
            let ticket = seq.issue();
            spawn_local(async move {
                let result = api.profile().await;
                if !seq.is_current(ticket) {
                    return;
                }
                loading.set(false);
                match result {
                    Ok(loaded) => apply.emit(loaded),
                    Err(err) => load_flash.set(Some(Flash::failure("errors.profile_load", &err))),
                }
            });
            || {}
        });
    }

    let on_save = {
        let api = Rc::clone(&ctx.api);
        let (favorite_color, retirement_plane, saving, save_flash, apply) = (
            favorite_color.clone(),
            retirement_plane.clone(),
            saving.clone(),
            save_flash.clone(),
            apply.clone(),
        );
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let api = Rc::clone(&api);
            let (fav, plane) = ((*favorite_color).clone(), (*retirement_plane).clone());
            let (saving, save_flash, apply) = (saving.clone(), save_flash.clone(), apply.clone());
            saving.set(true);
            save_flash.set(None);
            spawn_local(async move {
                let result = profile::save_profile(&api, &fav, &plane).await;
                saving.set(false);
                match result {
                    Ok(updated) => {
                        apply.emit(updated);
                        save_flash.set(Some(Flash::Success(t("profile.updated"))));
                    }
                    Err(err) => save_flash.set(Some(Flash::failure("errors.profile_update", &err))),
                }
            });
        })
    };

    let on_file_change = {
        let (selected, upload_flash) = (selected.clone(), upload_flash.clone());
        Callback::from(move |e: Event| {
            let file = e
                .target_dyn_into::<HtmlInputElement>()
                .and_then(|input| input.files())
                .and_then(|files| files.get(0));
            upload_flash.set(None);
            selected.set(file);
        })
    };

    let on_upload = {
        let api = Rc::clone(&ctx.api);
        let (selected, uploading, upload_flash, save_flash, apply, file_input) = (
            selected.clone(),
            uploading.clone(),
            upload_flash.clone(),
            save_flash.clone(),
            apply.clone(),
            file_input.clone(),
        );
        Callback::from(move |_: MouseEvent| {
            let api = Rc::clone(&api);
            let file = (*selected).clone();
            let (selected, uploading, upload_flash, apply, file_input) = (
                selected.clone(),
                uploading.clone(),
                upload_flash.clone(),
                apply.clone(),
                file_input.clone(),
            );
            uploading.set(true);
            upload_flash.set(None);
            save_flash.set(None);
            spawn_local(async move {
                let part = match file_part(file).await {
                    Ok(part) => part,
                    Err(message) => {
                        log::warn!("could not read avatar file: {message}");
                        uploading.set(false);
                        let text = format!("{}: {message}", t("errors.avatar_upload"));
                        upload_flash.set(Some(Flash::Error(text)));
                        return;
                    }
                };
                let result = profile::upload_avatar(&api, part).await;
                uploading.set(false);
                match result {
                    Ok(updated) => {
                        apply.emit(updated);
                        selected.set(None);
                        if let Some(input) = file_input.cast::<HtmlInputElement>() {
                            input.set_value("");
                        }
                        upload_flash.set(Some(Flash::Success(t("profile.avatar_uploaded"))));
                    }
                    Err(err) => {
                        upload_flash.set(Some(Flash::failure("errors.avatar_upload", &err)));
                    }
                }
            });
        })
    };

    if *loading {
        return html! { <p aria-busy="true">{ t("profile.loading") }</p> };
    }
    let Some(current) = (*profile_state).clone() else {
        return html! {
            <StatusLine flash={(*load_flash).clone().or_else(|| Some(Flash::Info(t("profile.unavailable"))))} />
        };
    };

    html! {
        <article class="profile-page">
            <h3>{ t("profile.title") }</h3>
            <div class="grid">
                <section>
                    <ProfileSummary profile={current} />
                    <div class="avatar-upload">
                        <label for="avatar-upload">{ t("profile.upload_label") }</label>
                        <input
                            ref={file_input}
                            id="avatar-upload"
                            type="file"
                            accept={ACCEPTED_IMAGES}
                            onchange={on_file_change}
                        />
                        <button
                            type="button"
                            disabled={selected.is_none() || *uploading}
                            aria-busy={uploading.to_string()}
                            onclick={on_upload}
                        >
                            { t("profile.upload") }
                        </button>
                        <StatusLine flash={(*upload_flash).clone()} />
                    </div>
                </section>
                <form onsubmit={on_save}>
                    <label for="favorite-color">{ t("profile.favorite_color") }</label>
                    <input
                        id="favorite-color"
                        type="text"
                        value={(*favorite_color).clone()}
                        oninput={bind_input(&favorite_color)}
                    />
                    <label for="retirement-plane">{ t("profile.retirement_plane") }</label>
                    <input
                        id="retirement-plane"
                        type="text"
                        value={(*retirement_plane).clone()}
                        oninput={bind_input(&retirement_plane)}
                    />
                    <button type="submit" disabled={*saving} aria-busy={saving.to_string()}>
                        { t("profile.save") }
                    </button>
                    <StatusLine flash={(*save_flash).clone()} />
                </form>
            </div>
        </article>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    fn own(avatar_url: Option<&str>) -> OwnProfile {
        OwnProfile {
            id: 2,
            username: "mira".into(),
            email: Some("mira@example.com".into()),
            avatar_url: avatar_url.map(str::to_string),
            favorite_color: None,
            retirement_plane: None,
            registered_on: None,
        }
    }

    #[test]
    fn summary_lists_account_fields() {
        let html = block_on(
            LocalServerRenderer::<ProfileSummary>::with_props(ProfileSummaryProps {
                profile: own(None),
            })
            .render(),
        );
        assert!(html.contains("mira@example.com"));
        assert!(html.contains("Not set"));
        assert!(!html.contains("<img"));
    }

    #[test]
    fn summary_shows_an_uploaded_avatar() {
        let html = block_on(
            LocalServerRenderer::<ProfileSummary>::with_props(ProfileSummaryProps {
                profile: own(Some("/static/avatars/2.png")),
            })
            .render(),
        );
        assert!(html.contains("/static/avatars/2.png"), "{html}");
    }
}
