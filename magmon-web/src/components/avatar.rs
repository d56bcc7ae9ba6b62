use crate::context::use_app_context;
use crate::paths::avatar_src;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    /// Backend path of the uploaded image, if any.
    pub url: Option<String>,
    pub alt: AttrValue,
    #[prop_or(48)]
    pub size: u32,
}

#[function_component(Avatar)]
pub fn avatar(props: &Props) -> Html {
    let ctx = use_app_context();
    let src = avatar_src(ctx.api.config(), props.url.as_deref());
    let size = props.size.to_string();
    html! {
        <img class="avatar" src={src} alt={props.alt.clone()} width={size.clone()} height={size} />
    }
}
