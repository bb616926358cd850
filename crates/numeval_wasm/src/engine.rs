//! `wasm-bindgen` entry points over the core engine.

use js_sys::Array;
use numeval_core::functions;
use numeval_core::value::Value;
use numeval_core::{Engine, EvalSettings};
use serde_wasm_bindgen::{from_value, to_value};
use wasm_bindgen::prelude::*;

use crate::wire::{describe_error, normalize_args, WireValue};

#[wasm_bindgen]
pub struct WasmEngine {
    engine: Engine,
}

impl WasmEngine {
    pub fn from_settings(settings: EvalSettings) -> Self {
        Self {
            engine: Engine::new(settings),
        }
    }

    /// Evaluate a catalogue function on already-decoded wire arguments.
    pub fn evaluate_wire(&self, name: &str, args: Vec<WireValue>) -> anyhow::Result<WireValue> {
        let values = normalize_args(args, self.engine.settings())?;
        let result = functions::call(&self.engine, name, &values).map_err(describe_error)?;
        WireValue::from_value(&result)
    }

    fn decode(&self, value: JsValue) -> Result<Value, JsValue> {
        let wire: WireValue =
            from_value(value).map_err(|e| JsValue::from_str(&format!("Invalid argument: {}", e)))?;
        wire.into_value(self.engine.settings())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    fn encode(&self, result: numeval_core::EvalResult<Value>) -> Result<JsValue, JsValue> {
        let result = result.map_err(|e| JsValue::from_str(&describe_error(e).to_string()))?;
        let wire = WireValue::from_value(&result).map_err(|e| JsValue::from_str(&e.to_string()))?;
        to_value(&wire).map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }
}

#[wasm_bindgen]
impl WasmEngine {
    /// `settings` may be `undefined`, `null` or a partial settings object.
    #[wasm_bindgen(constructor)]
    pub fn new(settings: JsValue) -> Result<WasmEngine, JsValue> {
        console_error_panic_hook::set_once();

        let settings: EvalSettings = if settings.is_undefined() || settings.is_null() {
            EvalSettings::default()
        } else {
            from_value(settings).map_err(|e| JsValue::from_str(&format!("Invalid evaluation settings: {}", e)))?
        };
        Ok(WasmEngine::from_settings(settings))
    }

    /// Call a function by name with a variadic argument list.
    pub fn evaluate(&self, name: &str, args: Array) -> Result<JsValue, JsValue> {
        let args = args
            .iter()
            .map(|arg| from_value::<WireValue>(arg).map_err(|e| JsValue::from_str(&format!("Invalid argument: {}", e))))
            .collect::<Result<Vec<_>, _>>()?;
        let result = self
            .evaluate_wire(name, args)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        to_value(&result).map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    pub fn atan(&self, x: JsValue) -> Result<JsValue, JsValue> {
        let x = self.decode(x)?;
        self.encode(self.engine.atan(&x))
    }

    pub fn edivide(&self, a: JsValue, b: JsValue) -> Result<JsValue, JsValue> {
        let a = self.decode(a)?;
        let b = self.decode(b)?;
        self.encode(self.engine.edivide(&a, &b))
    }

    /// Minimum of one container.
    pub fn min(&self, container: JsValue) -> Result<JsValue, JsValue> {
        let container = self.decode(container)?;
        self.encode(self.engine.min(&container))
    }

    /// Minimum of a list of scalars.
    #[wasm_bindgen(js_name = minOf)]
    pub fn min_of(&self, scalars: Array) -> Result<JsValue, JsValue> {
        let scalars = scalars
            .iter()
            .map(|scalar| self.decode(scalar))
            .collect::<Result<Vec<_>, _>>()?;
        self.encode(self.engine.min_of(&scalars))
    }
}
