//! DOM wiring for the Valentine page.
//!
//! Binds the page elements by id, keeps the mutable bits (last cursor, RNG,
//! celebration, song, yes growth) in a thread-local, and forwards browser
//! events into the pure `evade` / `celebration` / `hearts` / `audio` logic.
//! Geometry is measured at event time. The one exception is the "No"
//! button's origin: the last position written to its style is kept so an
//! in-flight CSS transition does not leak into the next dodge.

use std::cell::RefCell;
use std::fmt;

use gloo::console;
use gloo::timers::callback::Timeout;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    Document, Element, HtmlCanvasElement, HtmlElement, HtmlMediaElement, HtmlVideoElement,
    KeyboardEvent, MouseEvent, TouchEvent, window,
};

use crate::audio::{self, PlaybackError, SongCommand, SongToggle};
use crate::celebration::Celebration;
use crate::config::PageConfig;
use crate::evade::{self, Layout, Placement, YesGrowth};
use crate::geometry::{Point, Rect, Size};
use crate::hearts::{HEART_GLYPH, HeartSpec, POP_LIFETIME_MS, PopHeart};

pub mod fireworks;

// --- Element ids ---------------------------------------------------------------

pub const NO_ID: &str = "noBtn";
pub const YES_ID: &str = "yesBtn";
pub const CONTENT_ID: &str = "content";
pub const SUCCESS_ID: &str = "success";
pub const HERO_ID: &str = "hero";
pub const FLOATING_HEARTS_ID: &str = "floatingHearts";
pub const LOVE_NOTES_ID: &str = "loveNotes";
pub const MEMORIES_ID: &str = "memories";
pub const SUCCESS_HEARTS_ID: &str = "successHearts";
pub const FIREWORKS_VIDEO_ID: &str = "fireworksVideo";
pub const FIREWORKS_CANVAS_ID: &str = "fireworksCanvas";
pub const SONG_ID: &str = "song";
pub const SONG_TOGGLE_ID: &str = "songToggle";
pub const SONG_HINT_ID: &str = "songHint";
pub const MODAL_DISMISS_ID: &str = "modalDismiss";

// --- Errors --------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageError {
    NoWindow,
    NoDocument,
    MissingElement(&'static str),
    WrongElement(&'static str),
}

impl fmt::Display for PageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageError::NoWindow => f.write_str("no window"),
            PageError::NoDocument => f.write_str("no document"),
            PageError::MissingElement(id) => write!(f, "missing element #{id}"),
            PageError::WrongElement(id) => write!(f, "element #{id} has an unexpected type"),
        }
    }
}

impl std::error::Error for PageError {}

impl From<PageError> for JsValue {
    fn from(err: PageError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

// --- Elements ------------------------------------------------------------------

struct Elements {
    no: HtmlElement,
    yes: HtmlElement,
    content: Element,
    success: Element,
    hero: HtmlElement,
    success_hearts: Element,
    video: Option<HtmlVideoElement>,
    canvas: Option<HtmlCanvasElement>,
    song: Option<HtmlMediaElement>,
    song_toggle: Option<HtmlElement>,
    song_hint: Option<HtmlElement>,
}

fn required<T: JsCast>(doc: &Document, id: &'static str) -> Result<T, PageError> {
    doc.get_element_by_id(id)
        .ok_or(PageError::MissingElement(id))?
        .dyn_into::<T>()
        .map_err(|_| PageError::WrongElement(id))
}

fn optional<T: JsCast>(doc: &Document, id: &str) -> Option<T> {
    doc.get_element_by_id(id).and_then(|el| el.dyn_into::<T>().ok())
}

impl Elements {
    fn bind(doc: &Document) -> Result<Self, PageError> {
        Ok(Self {
            no: required(doc, NO_ID)?,
            yes: required(doc, YES_ID)?,
            content: required(doc, CONTENT_ID)?,
            success: required(doc, SUCCESS_ID)?,
            hero: required(doc, HERO_ID)?,
            success_hearts: required(doc, SUCCESS_HEARTS_ID)?,
            video: optional(doc, FIREWORKS_VIDEO_ID),
            canvas: optional(doc, FIREWORKS_CANVAS_ID),
            song: optional(doc, SONG_ID),
            song_toggle: optional(doc, SONG_TOGGLE_ID),
            song_hint: optional(doc, SONG_HINT_ID),
        })
    }
}

// --- State ---------------------------------------------------------------------

struct PageState {
    els: Elements,
    config: PageConfig,
    rng: SmallRng,
    /// Last pointer/touch position in viewport coordinates.
    cursor: Option<Point>,
    growth: YesGrowth,
    celebration: Celebration,
    song: SongToggle,
    fireworks_started: bool,
    /// Top-left last written to the "No" button's style.
    no_at: Option<Point>,
}

thread_local! {
    static PAGE_STATE: RefCell<Option<PageState>> = const { RefCell::new(None) };
}

fn with_state<R>(f: impl FnOnce(&mut PageState) -> R) -> Option<R> {
    PAGE_STATE.with(|cell| cell.borrow_mut().as_mut().map(f))
}

// --- Measurement ---------------------------------------------------------------

fn viewport() -> Option<Size> {
    let win = window()?;
    let w = win.inner_width().ok()?.as_f64()?;
    let h = win.inner_height().ok()?.as_f64()?;
    Some(Size::new(w, h))
}

fn client_rect(el: &Element) -> Rect {
    let r = el.get_bounding_client_rect();
    Rect::new(r.left(), r.top(), r.width(), r.height())
}

fn measure(st: &PageState) -> Option<Layout> {
    Layout::measured(viewport()?, client_rect(&st.els.no), client_rect(&st.els.yes))
        .map(|layout| layout.settled(st.no_at))
}

// --- Bootstrapping -------------------------------------------------------------

/// Bind every listener on the current document. Safe to call once per page.
pub fn start() -> Result<(), JsValue> {
    let win = window().ok_or(PageError::NoWindow)?;
    let doc = win.document().ok_or(PageError::NoDocument)?;

    let config = load_config(&doc);
    let els = Elements::bind(&doc)?;
    let mut rng = SmallRng::from_entropy();

    if let Some(list) = optional::<Element>(&doc, LOVE_NOTES_ID) {
        render_love_notes(&doc, &list)?;
    }
    if let Some(list) = optional::<Element>(&doc, MEMORIES_ID) {
        render_memories(&doc, &list)?;
    }
    if let Some(field) = optional::<Element>(&doc, FLOATING_HEARTS_ID) {
        spawn_hearts(&doc, &field, &config.floating_hearts.generate(&mut rng), "heart")?;
    }

    let state = PageState {
        els,
        config,
        rng,
        cursor: None,
        growth: YesGrowth::new(),
        celebration: Celebration::new(),
        song: SongToggle::new(),
        fireworks_started: false,
        no_at: None,
    };
    PAGE_STATE.with(|cell| cell.replace(Some(state)));

    install_listeners(&doc)?;
    with_state(|st| {
        park_no(st);
        refresh_song(st);
    });
    console::log!("valentine page bound");
    Ok(())
}

#[cfg(feature = "serde_json")]
fn load_config(doc: &Document) -> PageConfig {
    let Some(text) = doc
        .get_element_by_id(crate::config::CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content())
    else {
        return PageConfig::default();
    };
    match PageConfig::from_json(&text) {
        Ok(cfg) => cfg,
        Err(err) => {
            console::warn!("ignoring page config", err.to_string());
            PageConfig::default()
        }
    }
}

#[cfg(not(feature = "serde_json"))]
fn load_config(_doc: &Document) -> PageConfig {
    PageConfig::default()
}

fn install_listeners(doc: &Document) -> Result<(), JsValue> {
    let win = window().ok_or(PageError::NoWindow)?;
    let (no, yes, song_toggle) = with_state(|st| {
        (
            st.els.no.clone(),
            st.els.yes.clone(),
            st.els.song_toggle.clone(),
        )
    })
    .ok_or_else(|| JsValue::from_str("page state missing"))?;

    // Pointer proximity
    {
        let closure = Closure::wrap(Box::new(move |evt: MouseEvent| {
            on_pointer(Point::new(evt.client_x() as f64, evt.client_y() as f64));
        }) as Box<dyn FnMut(_)>);
        doc.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    for kind in ["touchstart", "touchmove"] {
        let closure = Closure::wrap(Box::new(move |evt: TouchEvent| {
            if let Some(touch) = evt.touches().get(0) {
                on_pointer(Point::new(touch.client_x() as f64, touch.client_y() as f64));
            }
        }) as Box<dyn FnMut(_)>);
        doc.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // "No" never activates: clicks are swallowed, focus and Enter/Space dodge.
    {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::Event| {
            evt.prevent_default();
        }) as Box<dyn FnMut(_)>);
        no.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    {
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::FocusEvent| {
            on_focus_dodge();
        }) as Box<dyn FnMut(_)>);
        no.add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    {
        let closure = Closure::wrap(Box::new(move |evt: KeyboardEvent| {
            let key = evt.key();
            if key == "Enter" || key == " " {
                evt.prevent_default();
                on_focus_dodge();
            }
        }) as Box<dyn FnMut(_)>);
        no.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // "Yes"
    {
        let closure = Closure::wrap(Box::new(move |_evt: MouseEvent| {
            if let Err(err) = on_yes() {
                console::warn!("celebration failed", err);
            }
        }) as Box<dyn FnMut(_)>);
        yes.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    if let Some(dismiss) = optional::<HtmlElement>(doc, MODAL_DISMISS_ID) {
        let closure = Closure::wrap(Box::new(move |_evt: MouseEvent| {
            with_state(dismiss_celebration);
        }) as Box<dyn FnMut(_)>);
        dismiss.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Song
    if let Some(toggle) = song_toggle {
        let closure = Closure::wrap(Box::new(move |_evt: MouseEvent| {
            on_song_toggle();
        }) as Box<dyn FnMut(_)>);
        toggle.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Click pops anywhere on the page
    {
        let closure = Closure::wrap(Box::new(move |evt: MouseEvent| {
            if let Err(err) = spawn_pop(evt.client_x() as f64, evt.client_y() as f64) {
                console::warn!("pop heart failed", err);
            }
        }) as Box<dyn FnMut(_)>);
        win.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Resize: park "No" again and keep the fireworks canvas full-size
    {
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::Event| {
            with_state(|st| {
                park_no(st);
                if let Some(canvas) = &st.els.canvas {
                    fireworks::resize_canvas(canvas);
                }
            });
        }) as Box<dyn FnMut(_)>);
        win.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    Ok(())
}

// --- Evasion -------------------------------------------------------------------

fn on_pointer(cursor: Point) {
    with_state(|st| {
        st.cursor = Some(cursor);
        if st.celebration.is_celebrating() {
            return;
        }
        let Some(layout) = measure(st) else {
            return;
        };
        if let Some(placement) = evade::evade_pointer(&layout, cursor, &st.config.evade, &mut st.rng) {
            apply_dodge(st, placement);
        }
    });
}

fn on_focus_dodge() {
    with_state(|st| {
        let Some(layout) = measure(st) else {
            console::log!("layout unavailable, skipping dodge");
            return;
        };
        let placement = evade::evade_focus(&layout, &st.config.evade, &mut st.rng);
        apply_dodge(st, placement);
    });
}

fn apply_dodge(st: &mut PageState, placement: Placement) {
    if !placement.moved() {
        return;
    }
    move_no(st, placement.position);
    st.growth.grow();
    let yes = &st.els.yes;
    yes.style().set_property("transform", &st.growth.transform()).ok();
    // Restart the grow animation.
    yes.class_list().remove_1("grow").ok();
    let _ = yes.offset_width();
    yes.class_list().add_1("grow").ok();
}

fn move_no(st: &mut PageState, at: Point) {
    let style = st.els.no.style();
    style.set_property("left", &format!("{}px", at.x)).ok();
    style.set_property("top", &format!("{}px", at.y)).ok();
    st.no_at = Some(at);
}

fn park_no(st: &mut PageState) {
    let Some(layout) = measure(st) else {
        return;
    };
    let at = evade::park_beside(&layout.yes, layout.no.size, layout.container);
    move_no(st, at);
}

// --- Celebration ---------------------------------------------------------------

fn on_yes() -> Result<(), JsValue> {
    let Some(doc) = window().and_then(|w| w.document()) else {
        return Ok(());
    };
    let pending = with_state(|st| -> Result<Option<(HtmlVideoElement, HtmlCanvasElement, u32)>, JsValue> {
        if !st.celebration.accept() {
            return Ok(None);
        }
        console::log!("celebration entered", st.celebration.times_entered());
        st.els.content.class_list().add_1("hide")?;
        st.els.success.class_list().add_1("active")?;
        st.els.hero.style().set_property("background", "#000")?;
        let hearts = st.config.success_hearts.generate(&mut st.rng);
        spawn_hearts(&doc, &st.els.success_hearts, &hearts, "success-heart")?;

        if st.fireworks_started {
            return Ok(None);
        }
        match (st.els.video.clone(), st.els.canvas.clone()) {
            (Some(video), Some(canvas)) => {
                st.fireworks_started = true;
                Ok(Some((video, canvas, st.config.fireworks_pixel)))
            }
            _ => Ok(None),
        }
    })
    .transpose()?
    .flatten();

    if let Some((video, canvas, pixel)) = pending {
        play_fireworks_video(&video);
        fireworks::start(video, canvas, pixel)?;
    }
    Ok(())
}

fn play_fireworks_video(video: &HtmlVideoElement) {
    match video.play() {
        Ok(promise) => wasm_bindgen_futures::spawn_local(async move {
            if let Err(err) = JsFuture::from(promise).await {
                console::warn!("fireworks video did not start", err);
            }
        }),
        Err(err) => console::warn!("fireworks video did not start", err),
    }
}

fn dismiss_celebration(st: &mut PageState) {
    if !st.celebration.dismiss() {
        return;
    }
    st.els.content.class_list().remove_1("hide").ok();
    st.els.success.class_list().remove_1("active").ok();
    st.els.hero.style().remove_property("background").ok();
    park_no(st);
}

// --- Song ----------------------------------------------------------------------

fn on_song_toggle() {
    let play = with_state(|st| {
        let media = st.els.song.clone()?;
        match st.song.toggle() {
            SongCommand::Pause => {
                media.pause().ok();
                refresh_song(st);
                None
            }
            SongCommand::Play => Some(media.play()),
        }
    })
    .flatten();

    let Some(started) = play else { return };
    wasm_bindgen_futures::spawn_local(async move {
        let result = match started {
            Ok(promise) => JsFuture::from(promise)
                .await
                .map(|_| ())
                .map_err(|err| PlaybackError::from_js(&err, false)),
            Err(err) => Err(PlaybackError::from_js(&err, true)),
        };
        if let Err(err) = &result {
            console::warn!("song unavailable", err.to_string());
        }
        with_state(|st| {
            st.song.play_finished(result);
            refresh_song(st);
        });
    });
}

fn refresh_song(st: &mut PageState) {
    if let Some(toggle) = &st.els.song_toggle {
        toggle.set_text_content(Some(st.song.label()));
    }
    if let Some(hint) = &st.els.song_hint {
        hint.set_text_content(Some(&audio::missing_song_hint()));
        hint.set_hidden(!st.song.has_error());
    }
}

// --- Keepsakes -----------------------------------------------------------------

fn render_love_notes(doc: &Document, list: &Element) -> Result<(), JsValue> {
    for &note in crate::LOVE_NOTES {
        let card = doc.create_element("article")?;
        card.set_class_name("note-card");
        let p = doc.create_element("p")?;
        p.set_text_content(Some(note));
        card.append_child(&p)?;
        list.append_child(&card)?;
    }
    Ok(())
}

fn render_memories(doc: &Document, list: &Element) -> Result<(), JsValue> {
    for &(title, note) in crate::MEMORIES {
        let card = doc.create_element("article")?;
        card.set_class_name("memory-card");
        let photo = doc.create_element("div")?;
        photo.set_class_name("memory-photo");
        photo.set_text_content(Some("Add a photo here"));
        let h = doc.create_element("h3")?;
        h.set_text_content(Some(title));
        let p = doc.create_element("p")?;
        p.set_text_content(Some(note));
        card.append_child(&photo)?;
        card.append_child(&h)?;
        card.append_child(&p)?;
        list.append_child(&card)?;
    }
    Ok(())
}

// --- Hearts --------------------------------------------------------------------

fn spawn_hearts(
    doc: &Document,
    container: &Element,
    hearts: &[HeartSpec],
    class: &str,
) -> Result<(), JsValue> {
    for heart in hearts {
        let span = doc.create_element("span")?;
        span.set_class_name(class);
        span.set_text_content(Some(HEART_GLYPH));
        span.set_attribute("style", &heart.style())?;
        container.append_child(&span)?;
    }
    Ok(())
}

fn spawn_pop(x: f64, y: f64) -> Result<(), JsValue> {
    let doc = window()
        .and_then(|w| w.document())
        .ok_or(PageError::NoDocument)?;
    let body = doc.body().ok_or(PageError::MissingElement("body"))?;
    let Some(pop) = with_state(|st| PopHeart::at(x, y, &mut st.rng)) else {
        return Ok(());
    };
    let span = doc.create_element("span")?;
    span.set_class_name("pop-heart");
    span.set_text_content(Some(HEART_GLYPH));
    span.set_attribute("style", &pop.style())?;
    body.append_child(&span)?;
    Timeout::new(POP_LIFETIME_MS, move || span.remove()).forget();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_error_messages() {
        assert_eq!(PageError::MissingElement(NO_ID).to_string(), "missing element #noBtn");
        assert_eq!(
            PageError::WrongElement(FIREWORKS_CANVAS_ID).to_string(),
            "element #fireworksCanvas has an unexpected type"
        );
    }
}
