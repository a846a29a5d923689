use std::{path::{Path, PathBuf}, rc::Rc, sync::{atomic::{AtomicUsize, Ordering}, Arc, RwLock}};

use termcolor::Buffer;

use crate::{eval::prelude::RuntimeWarning, lexer::prelude::LexicalWarning};
use super::diagnostic::{Diagnostic, Label, Level, Location};

pub trait WarningEmitterIO {
    fn emit_warning(&self, warning: Warning);
}

#[derive(Debug, Clone, Copy)]
pub struct NullWarningEmitterIO;

impl WarningEmitterIO for NullWarningEmitterIO {
    fn emit_warning(&self, _warning: Warning) {}
}

/// Collects warnings in memory; clones share the same list.
#[derive(Debug, Default, Clone)]
pub struct VectorWarningEmitterIO {
    pub warnings: Arc<RwLock<Vec<Warning>>>
}

impl VectorWarningEmitterIO {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&self) -> Vec<Warning> {
        match self.warnings.write() {
            Ok(mut warnings) => std::mem::take(&mut *warnings),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }

    pub fn len(&self) -> usize {
        self.warnings.read().map(|warnings| warnings.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl WarningEmitterIO for VectorWarningEmitterIO {
    fn emit_warning(&self, warning: Warning) {
        match self.warnings.write() {
            Ok(mut warnings) => warnings.push(warning),
            Err(poisoned) => poisoned.into_inner().push(warning),
        }
    }
}

/// Counts what passes through on its way to the underlying sink.
#[derive(Clone)]
pub struct WarningEmitter {
    count: Arc<AtomicUsize>,
    emitter: Rc<dyn WarningEmitterIO>
}

impl WarningEmitter {
    pub fn new(emitter: Rc<dyn WarningEmitterIO>) -> Self {
        Self {
            count: Arc::new(AtomicUsize::new(0)),
            emitter,
        }
    }

    pub fn null() -> Self {
        Self::new(Rc::new(NullWarningEmitterIO))
    }

    pub fn count(&self) -> usize {
        self.count.load(Ordering::Relaxed)
    }

    pub fn emit(&self, warning: Warning) {
        _ = self.count.fetch_add(1, Ordering::Relaxed);
        self.emitter.emit_warning(warning);
    }
}

/// Attaches the file a warning came from before handing it on.
#[derive(Clone)]
pub struct SourceWarningEmitter {
    path: PathBuf,
    src: String,
    emitter: WarningEmitter,
}

impl SourceWarningEmitter {
    pub fn new(path: PathBuf, src: String, emitter: WarningEmitter) -> Self {
        Self {
            path,
            src,
            emitter,
        }
    }

    pub fn null() -> Self {
        Self::new(PathBuf::new(), String::new(), WarningEmitter::null())
    }

    pub fn count(&self) -> usize {
        self.emitter.count()
    }

    pub fn source(&self) -> (&Path, &str) {
        (&self.path, &self.src)
    }

    pub fn emit_lexical(&self, warning: LexicalWarning) {
        self.emitter.emit(Warning::Lexical {
            path: self.path.clone(),
            src: self.src.clone(),
            warning,
        });
    }

    pub fn emit_runtime(&self, warning: RuntimeWarning) {
        self.emitter.emit(Warning::Runtime {
            path: self.path.clone(),
            src: self.src.clone(),
            warning,
        });
    }
}

#[derive(Debug, Clone)]
pub enum Warning {
    Lexical {
        path: PathBuf,
        src: String,
        warning: LexicalWarning
    },
    Runtime {
        path: PathBuf,
        src: String,
        warning: RuntimeWarning
    }
}

impl Warning {
    pub fn pretty_string(&self) -> String {
        let mut nocolor = Buffer::no_color();

        if self.pretty(&mut nocolor).is_err() {
            return self.to_diagnostic().title;
        }

        String::from_utf8_lossy(&nocolor.into_inner()).into_owned()
    }

    pub fn pretty(&self, buf: &mut Buffer) -> std::io::Result<()> {
        use std::io::Write;

        self.to_diagnostic().write(buf)?;
        buf.write_all(b"\n")
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            Warning::Lexical { path, src, warning } => {
                let (title, extra) = warning.details();

                Diagnostic {
                    title: format!("{title} at line {}", warning.line),
                    text: extra.join("\n"),
                    level: Level::Warning,
                    location: Some(Location {
                        src,
                        path: path.clone(),
                        label: Label::new(warning.location),
                    }),
                }
            },
            Warning::Runtime { path, src, warning } => match warning {
                RuntimeWarning::InvalidLoopBounds { location, lower, upper } => Diagnostic {
                    title: "Invalid loop bounds".into(),
                    text: format!("`{lower}` to `{upper}` are not whole numbers, the loop was skipped"),
                    level: Level::Warning,
                    location: Some(Location {
                        src,
                        path: path.clone(),
                        label: Label::new(*location).with_text("This loop never ran"),
                    }),
                },
            }
        }
    }
}
