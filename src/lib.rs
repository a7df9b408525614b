//! WebAssembly core for the Light Randomizer widget.
//!
//! The page owns the DOM; this crate owns the state. A `Randomizer` handle
//! wraps one [`session::Session`] and exposes a method per user action. Each
//! call returns either nothing, a notice string for the page to show, or
//! throws on an invalid range. [`session::Session::view`] produces the text
//! for every output surface.

pub mod command;
pub mod config;
pub mod error;
pub mod ledger;
pub mod rng;
pub mod selector;
pub mod session;
pub mod types;
pub mod view;

pub use config::RandomizerConfig;
pub use error::RandomizerError;
pub use session::Session;

// ─── WASM Exports (only compiled for wasm32 target) ─────────────────────────

#[cfg(target_arch = "wasm32")]
mod wasm_exports {
    use wasm_bindgen::prelude::*;
    use crate::command::{shortcut, Command, Notice};
    use crate::config::RandomizerConfig;
    use crate::error::RandomizerError;
    use crate::session::{integer_from_f64, Session};
    use crate::types::Field;

    #[wasm_bindgen]
    extern "C" {
        #[wasm_bindgen(js_namespace = console, js_name = log)]
        fn console_log(message: &str);

        #[wasm_bindgen(js_name = confirm)]
        fn browser_confirm(message: &str) -> bool;
    }

    /// Forwards `log` records to the browser console.
    struct ConsoleLogger;

    impl log::Log for ConsoleLogger {
        fn enabled(&self, metadata: &log::Metadata) -> bool {
            metadata.level() <= log::max_level()
        }

        fn log(&self, record: &log::Record) {
            if self.enabled(record.metadata()) {
                console_log(&format!("[{}] {}", record.level(), record.args()));
            }
        }

        fn flush(&self) {}
    }

    static LOGGER: ConsoleLogger = ConsoleLogger;

    #[wasm_bindgen(start)]
    pub fn wasm_start() {
        if log::set_logger(&LOGGER).is_ok() {
            log::set_max_level(log::LevelFilter::Info);
        }
        log::info!("Light Randomizer loaded. Space: generate, Ctrl+R: reset");
    }

    fn to_js(err: RandomizerError) -> JsValue {
        JsError::new(&err.to_string()).into()
    }

    fn parse_field(name: &str) -> Result<Field, JsValue> {
        Field::from_name(name)
            .ok_or_else(|| JsError::new(&format!("unknown field '{}', expected 'min' or 'max'", name)).into())
    }

    fn js_integer(name: &str, value: f64) -> Result<i64, JsValue> {
        integer_from_f64(value)
            .ok_or_else(|| JsError::new(&format!("{} must be a safe integer, got {}", name, value)).into())
    }

    fn notice_text(notice: Option<Notice>) -> Option<String> {
        notice.map(|n| n.to_string())
    }

    /// Session handle exported to JS as `Randomizer`.
    #[wasm_bindgen(js_name = "Randomizer")]
    pub struct WasmRandomizer {
        session: Session,
    }

    impl WasmRandomizer {
        fn run(&mut self, command: Command) -> Result<Option<String>, JsValue> {
            self.session
                .dispatch(command, browser_confirm)
                .map(notice_text)
                .map_err(to_js)
        }
    }

    #[wasm_bindgen(js_class = "Randomizer")]
    impl WasmRandomizer {
        /// Create a session. `config` may be `undefined` or a partial
        /// `RandomizerConfig` object with camelCase keys.
        #[wasm_bindgen(constructor)]
        pub fn new(config: JsValue) -> Result<WasmRandomizer, JsValue> {
            let config: RandomizerConfig = if config.is_undefined() || config.is_null() {
                RandomizerConfig::default()
            } else {
                serde_wasm_bindgen::from_value(config)
                    .map_err(|e| to_js(RandomizerError::ConfigInvalid(e.to_string())))?
            };
            let session = Session::new(config).map_err(to_js)?;
            Ok(WasmRandomizer { session })
        }

        /// Generate one number. Returns `{ number, min, max, isPooled, timestamp }`.
        #[wasm_bindgen(js_name = "generate")]
        pub fn generate(&mut self) -> Result<JsValue, JsValue> {
            let result = self.session.generate().map_err(to_js)?;
            Ok(serde_wasm_bindgen::to_value(&result)?)
        }

        /// Generate a batch. Returns the notice listing the numbers.
        #[wasm_bindgen(js_name = "generateMultiple")]
        pub fn generate_multiple(&mut self) -> Result<Option<String>, JsValue> {
            self.run(Command::GenerateBatch)
        }

        /// Asks for confirmation first; returns `undefined` when declined.
        #[wasm_bindgen(js_name = "clearHistory")]
        pub fn clear_history(&mut self) -> Result<Option<String>, JsValue> {
            self.run(Command::ClearHistory)
        }

        /// Asks for confirmation first; returns `undefined` when declined.
        #[wasm_bindgen(js_name = "resetAll")]
        pub fn reset_all(&mut self) -> Result<Option<String>, JsValue> {
            self.run(Command::ResetAll)
        }

        /// Throws unless `delta` is an integer within ±(2^53 - 1).
        #[wasm_bindgen(js_name = "changeValue")]
        pub fn change_value(&mut self, field: &str, delta: f64) -> Result<(), JsValue> {
            let field = parse_field(field)?;
            let delta = js_integer("delta", delta)?;
            self.run(Command::Adjust { field, delta })?;
            Ok(())
        }

        /// Throws unless both bounds are integers within ±(2^53 - 1).
        #[wasm_bindgen(js_name = "setRange")]
        pub fn set_range(&mut self, min: f64, max: f64) -> Result<Option<String>, JsValue> {
            let min = js_integer("min", min)?;
            let max = js_integer("max", max)?;
            self.run(Command::SetRange { min, max })
        }

        /// Mirror the raw text of an input after the user edits it.
        #[wasm_bindgen(js_name = "setInput")]
        pub fn set_input(&mut self, field: &str, text: String) -> Result<(), JsValue> {
            let field = parse_field(field)?;
            self.run(Command::SetInput { field, text })?;
            Ok(())
        }

        /// Handle a key event. Returns `{ handled: bool, notice: string | null }`;
        /// the page should `preventDefault()` when `handled` is true.
        #[wasm_bindgen(js_name = "handleKey")]
        pub fn handle_key(&mut self, code: &str, ctrl: bool, in_input: bool) -> Result<JsValue, JsValue> {
            let obj = js_sys::Object::new();
            let (handled, notice) = match shortcut(code, ctrl, in_input) {
                Some(command) => (true, self.run(command)?),
                None => (false, None),
            };
            js_sys::Reflect::set(&obj, &"handled".into(), &handled.into())?;
            let notice = notice.map(JsValue::from).unwrap_or(JsValue::NULL);
            js_sys::Reflect::set(&obj, &"notice".into(), &notice)?;
            Ok(obj.into())
        }

        /// Everything the page renders:
        /// `{ result, rangeLabel, history: [{ id, number, range, time }], historyEmpty }`.
        #[wasm_bindgen(js_name = "view")]
        pub fn view(&self) -> Result<JsValue, JsValue> {
            Ok(serde_wasm_bindgen::to_value(&self.session.view())?)
        }

        /// Raw history entries, most recent first.
        #[wasm_bindgen(js_name = "history")]
        pub fn history(&self) -> Result<JsValue, JsValue> {
            Ok(serde_wasm_bindgen::to_value(&self.session.history())?)
        }

        /// Returns `{ count, sum, average }`; `average` is `null` before the
        /// first generation.
        #[wasm_bindgen(js_name = "stats")]
        pub fn stats(&self) -> Result<JsValue, JsValue> {
            let totals = self.session.totals();
            let obj = js_sys::Object::new();
            js_sys::Reflect::set(&obj, &"count".into(), &(totals.count as f64).into())?;
            js_sys::Reflect::set(&obj, &"sum".into(), &(totals.sum as f64).into())?;
            let average = totals.average().map(JsValue::from).unwrap_or(JsValue::NULL);
            js_sys::Reflect::set(&obj, &"average".into(), &average)?;
            Ok(obj.into())
        }
    }
}
