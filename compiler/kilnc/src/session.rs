//! A checking session: one checker, many forms, one report.

use kiln_ir::{Program, StringInterner};
use kiln_types::{Checker, FormOutcome};

use crate::{init_tracing, ErrorPolicy, ExprPrinter, Report, ReportEntry, SessionConfig};

pub struct Session {
    config: SessionConfig,
    checker: Checker,
}

impl Session {
    /// Start a session. Prelude names are interned into `interner`, which
    /// must be the interner the checked programs were built with.
    pub fn new(config: SessionConfig, interner: &mut StringInterner) -> Self {
        if config.trace {
            init_tracing();
        }
        let checker = if config.prelude {
            Checker::with_prelude(interner)
        } else {
            Checker::new()
        };
        Session { config, checker }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn checker(&self) -> &Checker {
        &self.checker
    }

    /// The running context's tables, for diagnostics.
    pub fn context_dump(&self, interner: &StringInterner) -> String {
        self.checker.context().render(self.checker.pool(), interner)
    }

    /// Check `program`'s forms in order. Forms checked in earlier runs stay
    /// visible.
    #[tracing::instrument(level = "debug", skip_all, fields(forms = program.forms.len()))]
    pub fn run(&mut self, program: &Program, interner: &StringInterner) -> Report {
        let mut report = Report::default();
        for form in &program.forms {
            match self.checker.check_form(&program.arena, form) {
                Ok(checked) => {
                    let entry = self.describe(program, &checked.outcome, interner);
                    report.push(entry);
                }
                Err(err) => {
                    let diag = err.to_diagnostic(self.checker.pool(), interner);
                    tracing::debug!(code = %diag.code, "form failed");
                    report.push(ReportEntry::Failed(diag));
                    if self.config.error_policy == ErrorPolicy::Halt {
                        break;
                    }
                }
            }
        }
        report
    }

    fn describe(
        &self,
        program: &Program,
        outcome: &FormOutcome,
        interner: &StringInterner,
    ) -> ReportEntry {
        let pool = self.checker.pool();
        match outcome {
            FormOutcome::TypeDefined { types, tags } => {
                tracing::trace!(context = %self.context_dump(interner), "context after type definition");
                ReportEntry::TypeDefined {
                    types: types.iter().map(|&n| interner.lookup(n).to_string()).collect(),
                    tags: tags.iter().map(|&n| interner.lookup(n).to_string()).collect(),
                }
            }
            FormOutcome::Evaluated { expr, ty } => ReportEntry::Evaluated {
                expr: ExprPrinter::new(&program.arena, interner).print(*expr),
                ty: pool.format_type(*ty, interner),
            },
            FormOutcome::Bound { name, scheme } => ReportEntry::Bound {
                name: interner.lookup(*name).to_string(),
                scheme: pool.format_scheme(scheme, interner),
            },
        }
    }
}
