use armsim_console_core::views::SnapshotView;
use armsim_console_core::{ClientConfig, ClientError, Controls, Event, Session};
use futures::StreamExt;
use gloo_net::websocket::Message;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, KeyboardEvent, SubmitEvent};
use yew::prelude::*;

mod channel;

use channel::SocketTransport;

type SharedSession = Rc<RefCell<Option<Session<SocketTransport>>>>;

fn log(text: &str) {
    web_sys::console::log_1(&text.into());
}

fn alert(text: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(text);
    }
}

fn report(err: &ClientError) {
    log(&format!("error: {err}"));
    match err {
        ClientError::Simulator(message) => alert(&format!("Error: {message}")),
        other => alert(&other.to_string()),
    }
}

fn config() -> ClientConfig {
    ClientConfig::from_lookup(|name| {
        match name {
            "ARMSIM_SOCKET_PATH" => option_env!("ARMSIM_SOCKET_PATH"),
            "ARMSIM_GREETING" => option_env!("ARMSIM_GREETING"),
            _ => None,
        }
        .map(str::to_string)
    })
}

fn endpoint(config: &ClientConfig) -> Option<String> {
    let location = web_sys::window()?.location();
    Some(config.endpoint(&location.protocol().ok()?, &location.host().ok()?))
}

/// Keys the simulator's keyboard device understands.
fn key_to_char(key: &str) -> Option<char> {
    match key {
        "Enter" => Some('\r'),
        "Backspace" => Some('\u{8}'),
        "Tab" => Some('\t'),
        _ => {
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(c),
                _ => None,
            }
        }
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let session: SharedSession = use_mut_ref(|| None);
    let snapshot = use_state(|| None::<Rc<SnapshotView>>);
    let selected_row = use_state(|| None::<usize>);
    let redraw = use_force_update();
    let search_ref = use_node_ref();
    let config = use_memo((), |_| config());

    {
        let session = session.clone();
        let snapshot = snapshot.clone();
        let redraw = redraw.clone();
        let config = config.clone();

        use_effect_with((), move |_| {
            let Some(url) = endpoint(&config) else {
                alert("no page location to connect from");
                return;
            };
            let (transport, mut read) = match channel::connect(&url) {
                Ok(pair) => pair,
                Err(e) => {
                    report(&e);
                    return;
                }
            };
            match Session::open(transport, (*config).clone()) {
                Ok(opened) => *session.borrow_mut() = Some(opened),
                Err(e) => {
                    report(&e);
                    return;
                }
            }
            log(&format!("connected to {url}"));
            redraw.force_update();

            spawn_local(async move {
                while let Some(msg) = read.next().await {
                    let text = match msg {
                        Ok(Message::Text(text)) => text,
                        Ok(Message::Bytes(_)) => continue,
                        Err(e) => {
                            log(&format!("socket error: {e}"));
                            break;
                        }
                    };
                    let outcome = match session.borrow_mut().as_mut() {
                        Some(active) => active.dispatch(&text),
                        None => break,
                    };
                    match outcome {
                        Ok(Event::Snapshot(view)) => snapshot.set(Some(Rc::from(view))),
                        Ok(Event::Unrecognized { kind, content }) => {
                            log(&format!("ignored {kind} message: {content}"));
                        }
                        Ok(_) => redraw.force_update(),
                        Err(e) if e.is_fatal() => break,
                        Err(e) => report(&e),
                    }
                }
                if let Some(active) = session.borrow_mut().as_mut() {
                    if !active.is_closed() {
                        let err = active.close("connection closed");
                        report(&err);
                    }
                }
                redraw.force_update();
            });
        });
    }

    // Runs a user action against the session and redraws.
    let act = {
        let session = session.clone();
        let redraw = redraw.clone();
        move |action: fn(&mut Session<SocketTransport>) -> armsim_console_core::Result<()>| {
            let session = session.clone();
            let redraw = redraw.clone();
            Callback::from(move |_: MouseEvent| {
                let outcome = match session.borrow_mut().as_mut() {
                    Some(active) => action(active),
                    None => return,
                };
                if let Err(e) = outcome {
                    report(&e);
                }
                redraw.force_update();
            })
        }
    };

    let on_load = act(|s| {
        let path = web_sys::window()
            .and_then(|w| {
                w.prompt_with_message("Please enter your filename (relative to the executable).")
                    .ok()
                    .flatten()
            })
            .filter(|p| !p.is_empty());
        match path {
            Some(path) => s.load(&path),
            None => Ok(()),
        }
    });
    let on_start = act(|s| s.start());
    let on_stop = act(|s| s.stop());
    let on_step = act(|s| s.step());
    let on_reset = act(|s| s.reset());
    let on_trace = act(|s| s.toggle_trace().map(|_| ()));
    let on_system_trace = act(|s| s.toggle_system_trace().map(|_| ()));

    let on_key = {
        let session = session.clone();
        let redraw = redraw.clone();
        Callback::from(move |e: KeyboardEvent| {
            let Some(ch) = key_to_char(&e.key()) else {
                return;
            };
            e.prevent_default();
            let sent = match session.borrow_mut().as_mut() {
                Some(active) => active.input(ch),
                None => return,
            };
            if let Err(err) = sent {
                report(&err);
                redraw.force_update();
            }
        })
    };

    let on_search = {
        let session = session.clone();
        let selected_row = selected_row.clone();
        let search_ref = search_ref.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let Some(input) = search_ref.cast::<HtmlInputElement>() else {
                return;
            };
            let found = match session.borrow().as_ref() {
                Some(active) => active.locate(&input.value()),
                None => return,
            };
            match found {
                Ok(Some(cursor)) => {
                    selected_row.set(Some(cursor.row));
                    let row = web_sys::window()
                        .and_then(|w| w.document())
                        .and_then(|d| d.get_element_by_id(&format!("memory-row-{}", cursor.row)));
                    if let Some(row) = row {
                        row.scroll_into_view();
                    }
                }
                Ok(None) => selected_row.set(None),
                Err(err) => report(&err),
            }
        })
    };

    let guard = session.borrow();
    let Some(active) = guard.as_ref() else {
        return html! { <div class="connecting">{ "Connecting to simulator..." }</div> };
    };
    let controls = active.controls();
    let closed = active.is_closed();
    let disabled = |control: Controls| closed || !controls.contains(control);
    let load_label = if active.is_loading() { "Loading..." } else { "Load" };
    let trace_label = if active.trace_enabled() {
        "Turn-off Tracing"
    } else {
        "Turn-on Tracing"
    };
    let system_trace_label = if active.system_trace_enabled() {
        "Turn-off System Tracing"
    } else {
        "Turn-on System Tracing"
    };
    let transcript = format!("{}\n{}", active.config().greeting, active.transcript().as_str());

    html! {
        <div class="console">
            <div class="toolbar">
                <button id="load-button" disabled={disabled(Controls::LOAD)} onclick={on_load}>{ load_label }</button>
                <button id="start-button" disabled={disabled(Controls::START)} onclick={on_start}>{ "Start" }</button>
                <button id="stop-button" disabled={disabled(Controls::STOP)} onclick={on_stop}>{ "Stop" }</button>
                <button id="step-button" disabled={disabled(Controls::STEP)} onclick={on_step}>{ "Step" }</button>
                <button id="reset-button" disabled={disabled(Controls::RESET)} onclick={on_reset}>{ "Reset" }</button>
                <button id="trace-button" disabled={closed} onclick={on_trace}>{ trace_label }</button>
                <button id="system-trace-button" disabled={closed} onclick={on_system_trace}>{ system_trace_label }</button>
                <span id="status">{ format!("Status: {}", active.state()) }</span>
                <span id="filename">{ format!("File: {}", active.filename().unwrap_or("")) }</span>
            </div>
            {
                match &*snapshot {
                    Some(view) => render_snapshot(view, *selected_row),
                    None => html! {},
                }
            }
            <form id="memory-search" onsubmit={on_search}>
                <input ref={search_ref} name="q" type="text" placeholder="Address (hex)" />
            </form>
            <div id="terminal">
                <textarea readonly={true} disabled={closed} value={transcript} onkeydown={on_key} />
            </div>
        </div>
    }
}

fn render_snapshot(view: &SnapshotView, selected_row: Option<usize>) -> Html {
    html! {
        <>
            <div id="flags">
                { for view.flags.iter().map(|f| html! {
                    <i class={if f.set { "active" } else { "hidden" }}>{ f.name.to_string() }</i>
                }) }
            </div>
            <span id="checksum">{ &view.checksum }</span>
            <span id="mode">{ &view.mode }</span>
            <table id="registers">
                <tbody>
                    { for view.registers.iter().map(|r| html! {
                        <tr><td>{ &r.label }</td><td>{ &r.value }</td></tr>
                    }) }
                </tbody>
            </table>
            <div id="instructions">
                { for view.disassembly.iter().map(|line| html! {
                    <div class={classes!("instruction", line.current.then_some("current"))}>
                        <span class="address">{ &line.address }</span>
                        <span class="encoded">{ &line.encoded }</span>
                        <span class="decoded">{ &line.mnemonic }</span>
                        <span class="arguments">{ &line.arguments }</span>
                    </div>
                }) }
            </div>
            <table id="stack">
                <tbody>
                    { for view.stack.iter().map(|s| html! {
                        <tr><td>{ &s.address }</td><td>{ &s.value }</td></tr>
                    }) }
                </tbody>
            </table>
            <div id="memory-container">
                { for view.memory.iter().enumerate().map(|(i, row)| html! {
                    <div id={format!("memory-row-{i}")}
                         class={classes!("memory-row", (selected_row == Some(i)).then_some("active"))}>
                        <span class="address">{ &row.address }</span>
                        <span class="bytes">{ row.hex() }</span>
                        <span class="ascii">{ &row.ascii }</span>
                    </div>
                }) }
            </div>
        </>
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
