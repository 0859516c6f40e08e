use anyhow::{anyhow, Context, Result};
use jaq_core::{compile::Undefined, load, Compiler, Ctx, RcIter};
use jaq_json::Val;
use serde_json::Value;

/// Run a jq filter over one input document, yielding every output as JSON.
///
/// Used to carve form descriptors out of arbitrary page dumps before
/// enumeration.
pub fn run_jaq(filter_src: &str, input: &Value) -> Result<Vec<Value>> {
    let loader = load::Loader::new(jaq_std::defs().chain(jaq_json::defs()));
    let arena = load::Arena::default();
    let modules = loader
        .load(&arena, load::File { code: filter_src, path: () })
        .map_err(|errs| syntax_failure(filter_src, errs))?;
    let filter = Compiler::default()
        .with_funs(jaq_std::funs().chain(jaq_json::funs()))
        .compile(modules)
        .map_err(|errs| unknown_names_failure(filter_src, errs))?;

    let inputs = RcIter::new(core::iter::empty());
    let outputs = filter
        .run((Ctx::new([], &inputs), Val::from(input.clone())))
        .map(|item| {
            let val = item.map_err(|e| anyhow!("jq `{filter_src}` failed at runtime: {e:?}"))?;
            // Val renders as JSON text
            let text = val.to_string();
            serde_json::from_str::<Value>(&text)
                .with_context(|| format!("jq `{filter_src}` produced non-JSON output: {text}"))
        })
        .collect::<Result<Vec<_>>>();
    outputs
}

fn syntax_failure(
    filter_src: &str,
    errs: Vec<(load::File<&str, ()>, load::Error<&str>)>,
) -> anyhow::Error {
    let problems = errs.iter().map(|(_, err)| format!("{err:?}")).collect::<Vec<_>>();
    anyhow!("cannot parse jq filter `{filter_src}`: {}", problems.join("; "))
}

fn unknown_names_failure(
    filter_src: &str,
    errs: Vec<(load::File<&str, ()>, Vec<(&str, Undefined)>)>,
) -> anyhow::Error {
    let names = errs
        .iter()
        .flat_map(|(_, undefined)| undefined.iter().map(|(name, kind)| format!("`{name}` ({kind:?})")))
        .collect::<Vec<_>>();
    anyhow!("jq filter `{filter_src}` uses undefined names: {}", names.join(", "))
}
