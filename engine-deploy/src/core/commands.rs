//! Shell command lines for the external tools.
//!
//! Commands are plain strings handed to the platform shell; arguments are
//! joined with single spaces and never quoted.

use std::path::Path;

use crate::core::paths::PathResolver;
use crate::core::recipe::{GeneratorTask, NinjaInvocation};

/// Configuration-tool command: `<tool> <flags...> <args...>`.
pub fn configure_command(tool: &Path, flags: &[String], args: &[String]) -> String {
    let mut parts = vec![tool.display().to_string()];
    parts.extend(flags.iter().cloned());
    parts.extend(args.iter().cloned());
    parts.join(" ").trim().to_string()
}

/// Build-executor command: `<program> -C <out_dir>/<config> <targets...>`.
pub fn build_command(program: &str, out_dir: &str, ninja: &NinjaInvocation) -> String {
    format!(
        "{program} -C {out_dir}/{} {}",
        ninja.config,
        ninja.targets.join(" ")
    )
    .trim()
    .to_string()
}

/// Generator command: `<language> <resolved script> <parameters...>`, trimmed.
///
/// A blank language leaves no leading token; the script path comes first.
pub fn generator_command(task: &GeneratorTask, resolver: &PathResolver) -> String {
    let script = resolver.resolve_one(&task.script);
    format!(
        "{} {} {}",
        task.language,
        script.display(),
        task.parameters.join(" ")
    )
    .trim()
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(language: &str, script: &str, parameters: &[&str]) -> GeneratorTask {
        GeneratorTask {
            language: language.to_string(),
            script: script.to_string(),
            parameters: parameters.iter().map(|p| p.to_string()).collect(),
        }
    }

    #[test]
    fn generator_without_language_starts_with_script() {
        let resolver = PathResolver::new("/work/engine/src");
        let command = generator_command(&task("", "gen.py", &["--x", "1"]), &resolver);
        assert_eq!(command, "/work/engine/src/gen.py --x 1");
    }

    #[test]
    fn generator_with_language_prefixes_interpreter() {
        let resolver = PathResolver::new("/work/engine/src");
        let command = generator_command(&task("python3", "tools/gen.py", &["a"]), &resolver);
        assert_eq!(command, "python3 /work/engine/src/tools/gen.py a");
    }

    #[test]
    fn generator_without_parameters_has_no_trailing_space() {
        let resolver = PathResolver::new("/work/engine/src");
        let command = generator_command(&task("dart", "gen.dart", &[]), &resolver);
        assert_eq!(command, "dart /work/engine/src/gen.dart");
    }

    #[test]
    fn configure_command_keeps_argument_order() {
        let command = configure_command(
            Path::new("/work/engine/src/flutter/tools/gn"),
            &["--no-goma".to_string()],
            &["--runtime-mode".to_string(), "release".to_string()],
        );
        assert_eq!(
            command,
            "/work/engine/src/flutter/tools/gn --no-goma --runtime-mode release"
        );
    }

    #[test]
    fn build_command_targets_config_dir() {
        let ninja = NinjaInvocation {
            config: "host_debug".to_string(),
            targets: vec!["flutter".to_string(), "sky_engine".to_string()],
        };
        assert_eq!(
            build_command("ninja", "out", &ninja),
            "ninja -C out/host_debug flutter sky_engine"
        );
    }

    #[test]
    fn build_command_without_targets_builds_default() {
        let ninja = NinjaInvocation {
            config: "ios_release".to_string(),
            targets: Vec::new(),
        };
        assert_eq!(build_command("ninja", "out", &ninja), "ninja -C out/ios_release");
    }

    #[test]
    fn build_command_with_empty_config_targets_out_dir() {
        let ninja = NinjaInvocation {
            config: String::new(),
            targets: vec!["flutter".to_string()],
        };
        assert_eq!(build_command("ninja", "out", &ninja), "ninja -C out/ flutter");
    }
}
