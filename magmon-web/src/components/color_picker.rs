use magmon_core::{Color, ColorSet};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub value: ColorSet,
    pub on_change: Callback<ColorSet>,
    #[prop_or_default]
    pub disabled: bool,
}

/// One checkbox per mana color, in WUBRG order with Colorless last.
#[function_component(ColorPicker)]
pub fn color_picker(props: &Props) -> Html {
    html! {
        <fieldset class="color-picker">
            <legend>{ crate::i18n::t("decks.colors") }</legend>
            { for Color::ALL.iter().map(|&color| {
                let id = format!("color-{}", color.letter());
                let onchange = {
                    let value = props.value;
                    let cb = props.on_change.clone();
                    Callback::from(move |_: Event| cb.emit(value.toggled(color)))
                };
                html! {
                    <label for={id.clone()} class="color-picker__option">
                        <input
                            type="checkbox"
                            id={id}
                            checked={props.value.contains(color)}
                            disabled={props.disabled}
                            {onchange}
                        />
                        { format!("{} ({})", color.name(), color.letter()) }
                    </label>
                }
            }) }
        </fieldset>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    #[test]
    fn checked_boxes_follow_the_set() {
        let props = Props {
            value: ColorSet::parse("BG"),
            on_change: Callback::noop(),
            disabled: false,
        };
        let html = block_on(LocalServerRenderer::<ColorPicker>::with_props(props).render());
        for color in Color::ALL {
            assert!(html.contains(&format!("id=\"color-{}\"", color.letter())));
        }
        assert!(html.contains("Black (B)"));
        assert!(html.contains("Colorless (C)"));
    }
}
