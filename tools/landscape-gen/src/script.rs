//! Python script assembly
//!
//! Generators build scripts line by line through [`ScriptBuilder`], which
//! tracks indentation so emitters can be nested inside generated functions
//! and loops. Values are turned into Python literals with [`py_str`] and
//! [`py_float`] rather than spliced in raw.

const INDENT: &str = "    ";

/// Line-oriented builder for Python source.
#[derive(Debug, Default)]
pub struct ScriptBuilder {
    output: String,
    depth: usize,
}

impl ScriptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one line at the current indentation.
    pub fn line(&mut self, text: impl AsRef<str>) -> &mut Self {
        let text = text.as_ref();
        if !text.is_empty() {
            for _ in 0..self.depth {
                self.output.push_str(INDENT);
            }
            self.output.push_str(text);
        }
        self.output.push('\n');
        self
    }

    pub fn blank(&mut self) -> &mut Self {
        self.output.push('\n');
        self
    }

    pub fn comment(&mut self, text: impl AsRef<str>) -> &mut Self {
        self.line(format!("# {}", text.as_ref()))
    }

    /// Emit `header` (e.g. `for i in range(3):`) and run `body` one level
    /// deeper.
    pub fn block(&mut self, header: impl AsRef<str>, body: impl FnOnce(&mut Self)) -> &mut Self {
        self.line(header);
        self.depth += 1;
        body(self);
        self.depth -= 1;
        self
    }

    /// Emit a call spread over several lines, one `name=value` argument per
    /// line.
    pub fn call(&mut self, target: &str, args: &[(&str, String)]) -> &mut Self {
        self.line(format!("{}(", target));
        self.depth += 1;
        for (i, (name, value)) in args.iter().enumerate() {
            let sep = if i + 1 < args.len() { "," } else { "" };
            self.line(format!("{}={}{}", name, value, sep));
        }
        self.depth -= 1;
        self.line(")")
    }

    /// Finished script without leading or trailing blank lines.
    pub fn finish(self) -> String {
        self.output.trim().to_string()
    }
}

/// Quote `value` as a double-quoted Python string literal.
pub fn py_str(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Format a float the way Python prints it (`15.0`, `0.35`).
pub fn py_float(value: f64) -> String {
    format!("{:?}", value)
}

/// Python boolean literal.
pub fn py_bool(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}

/// Python tuple literal of floats, e.g. `(0.1, 0.2, 0.3, 1.0)`.
pub fn py_float_tuple(values: &[f64]) -> String {
    let items: Vec<String> = values.iter().map(|v| py_float(*v)).collect();
    format!("({})", items.join(", "))
}
