//! Command construction for the five toolchain operations.
//!
//! Every operation is a pure function of the adapter's immutable state plus
//! its arguments: it returns the command token lists and executes nothing.
//! That purity is what lets a build orchestrator fan compile calls out
//! across worker threads with no locking.

use std::path::{Path, PathBuf};

use crossarm_target::{DefaultLib, TargetDescriptor};

use crate::error::{GccError, Result};
use crate::flags::{BuildProfile, FlagSet};
use crate::response::{ResponseFileKind, ResponseFileWriter};
use crate::tools::ToolPaths;

/// One external-process invocation as an ordered token list.
pub type CommandLine = Vec<String>;

/// Which compiler front end a compile call uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    C,
    Cpp,
}

/// A final rewrite applied to a fully assembled command before it is
/// returned, for environment-specific adjustments (wrapper scripts, path
/// translation) without touching the derivation logic.
pub type CommandTransform = Box<dyn Fn(CommandLine) -> CommandLine + Send + Sync>;

/// Optional per-tool-kind command transforms.
#[derive(Default)]
pub struct CommandHooks {
    pub assembler: Option<CommandTransform>,
    pub compiler: Option<CommandTransform>,
    pub linker: Option<CommandTransform>,
    pub archiver: Option<CommandTransform>,
    pub converter: Option<CommandTransform>,
}

fn apply(hook: &Option<CommandTransform>, cmd: CommandLine) -> CommandLine {
    match hook {
        Some(transform) => transform(cmd),
        None => cmd,
    }
}

/// Construction configuration for the adapter.
pub struct GccConfig {
    /// The hardware target being built for.
    pub target: TargetDescriptor,
    /// Optimization profile supplying the base flags.
    pub profile: BuildProfile,
    /// Library-size override; `None` defers to the descriptor.
    pub default_lib: Option<DefaultLib>,
    /// Toolchain root directory; empty means PATH resolution.
    pub toolchain_root: PathBuf,
    /// Project-wide preprocessor symbols, emitted as `-D` options.
    pub macros: Vec<String>,
    /// Project-wide config header, force-included into every C/C++ compile.
    pub config_header: Option<PathBuf>,
    /// Indirect long argument lists through response files (requires a
    /// writer, see [`GccToolchain::with_response_writer`]).
    pub response_files: bool,
}

impl GccConfig {
    /// Minimal configuration: develop profile, PATH-resolved tools.
    pub fn new(target: TargetDescriptor) -> Self {
        Self {
            target,
            profile: BuildProfile::develop(),
            default_lib: None,
            toolchain_root: PathBuf::new(),
            macros: Vec::new(),
            config_header: None,
            response_files: false,
        }
    }
}

/// Libraries every link falls back to, after user libraries.
const SYS_LIBS: [&str; 6] = ["stdc++", "supc++", "m", "c", "gcc", "nosys"];

/// Name of the preprocessed linker-script scratch file, placed next to the
/// link output.
const LINK_SCRIPT_SCRATCH: &str = ".link_script.ld";

/// The adapter: precomputed flags and tool paths for one target, and the
/// five command-building operations.
pub struct GccToolchain {
    target: TargetDescriptor,
    flags: FlagSet,
    tools: ToolPaths,
    macros: Vec<String>,
    config_header: Option<PathBuf>,
    response_files: bool,
    hooks: CommandHooks,
    response_writer: Option<Box<dyn ResponseFileWriter>>,
}

fn arg(path: &Path) -> String {
    path.display().to_string()
}

impl GccToolchain {
    pub fn new(config: GccConfig) -> Self {
        let default_lib = config
            .default_lib
            .unwrap_or_else(|| config.target.resolved_default_lib());
        let flags = FlagSet::derive(&config.profile, &config.target.core, default_lib);
        let tools = ToolPaths::from_root(&config.toolchain_root);
        Self {
            target: config.target,
            flags,
            tools,
            macros: config.macros,
            config_header: config.config_header,
            response_files: config.response_files,
            hooks: CommandHooks::default(),
            response_writer: None,
        }
    }

    /// Install command transforms, replacing any previous set.
    pub fn with_hooks(mut self, hooks: CommandHooks) -> Self {
        self.hooks = hooks;
        self
    }

    /// Install the response-file collaborator. Without one the
    /// `response_files` flag has no effect and argument lists stay inline.
    pub fn with_response_writer(mut self, writer: Box<dyn ResponseFileWriter>) -> Self {
        self.response_writer = Some(writer);
        self
    }

    pub fn target(&self) -> &TargetDescriptor {
        &self.target
    }

    pub fn flags(&self) -> &FlagSet {
        &self.flags
    }

    pub fn tools(&self) -> &ToolPaths {
        &self.tools
    }

    fn writer(&self) -> Option<&dyn ResponseFileWriter> {
        if self.response_files {
            self.response_writer.as_deref()
        } else {
            None
        }
    }

    /// `-D` defines, include paths (possibly via a response file), and the
    /// forced config header for non-assembly compiles.
    fn compile_options(&self, includes: &[PathBuf], for_asm: bool) -> Result<Vec<String>> {
        let mut opts: Vec<String> = self.macros.iter().map(|d| format!("-D{d}")).collect();

        let inc_opts: Vec<String> = includes.iter().map(|i| format!("-I{}", i.display())).collect();
        match self.writer() {
            Some(writer) => {
                let file = writer.write_response_file(ResponseFileKind::Include, &inc_opts)?;
                opts.push(format!("@{}", file.display()));
            }
            None => opts.extend(inc_opts),
        }

        if !for_asm {
            if let Some(header) = &self.config_header {
                opts.push("-include".to_string());
                opts.push(arg(header));
            }
        }
        Ok(opts)
    }

    /// Dependency-file generation options for a compile.
    fn dep_options(object: &Path) -> [String; 3] {
        let dep_path = object.with_extension("d");
        ["-MD".to_string(), "-MF".to_string(), arg(&dep_path)]
    }

    /// Build the command to assemble one source file.
    pub fn assemble(
        &self,
        source: &Path,
        object: &Path,
        includes: &[PathBuf],
    ) -> Result<Vec<CommandLine>> {
        let mut cmd = vec![arg(&self.tools.cc)];
        cmd.extend(self.flags.asm.iter().cloned());
        cmd.extend(self.flags.common.iter().cloned());
        cmd.extend(self.compile_options(includes, true)?);
        cmd.extend(["-o".to_string(), arg(object), arg(source)]);
        Ok(vec![apply(&self.hooks.assembler, cmd)])
    }

    /// Build the command to compile one source file with the chosen front
    /// end.
    pub fn compile(
        &self,
        lang: Language,
        source: &Path,
        object: &Path,
        includes: &[PathBuf],
    ) -> Result<Vec<CommandLine>> {
        let (tool, lang_flags) = match lang {
            Language::C => (&self.tools.cc, &self.flags.c),
            Language::Cpp => (&self.tools.cxx, &self.flags.cxx),
        };
        let mut cmd = vec![arg(tool)];
        cmd.extend(lang_flags.iter().cloned());
        cmd.extend(self.flags.common.iter().cloned());
        cmd.extend(self.compile_options(includes, false)?);
        cmd.extend(Self::dep_options(object));
        cmd.extend(["-o".to_string(), arg(object), arg(source)]);
        Ok(vec![apply(&self.hooks.compiler, cmd)])
    }

    pub fn compile_c(
        &self,
        source: &Path,
        object: &Path,
        includes: &[PathBuf],
    ) -> Result<Vec<CommandLine>> {
        self.compile(Language::C, source, object, includes)
    }

    pub fn compile_cpp(
        &self,
        source: &Path,
        object: &Path,
        includes: &[PathBuf],
    ) -> Result<Vec<CommandLine>> {
        self.compile(Language::Cpp, source, object, includes)
    }

    /// Build the link command list: a linker-script preprocessing step when
    /// a device memory map is supplied, then the link itself.
    ///
    /// The library list appears twice on purpose: once inside the
    /// start/end-group pair, once after the search-directory options. Both
    /// passes are needed for symbol resolution against circular static
    /// library dependencies and against libraries discovered through `-L`
    /// search paths; do not deduplicate.
    pub fn link(
        &self,
        output: &Path,
        objects: &[PathBuf],
        libraries: &[PathBuf],
        lib_dirs: &[PathBuf],
        mem_map: Option<&Path>,
    ) -> Result<Vec<CommandLine>> {
        let mut libs: Vec<String> = Vec::new();
        for library in libraries {
            let stem = library.file_stem().and_then(|s| s.to_str()).unwrap_or("");
            // Strip the "lib" prefix for the -l short form.
            let name = stem.get(3..).unwrap_or("");
            libs.push(format!("-l{name}"));
        }
        libs.extend(SYS_LIBS.iter().map(|l| format!("-l{l}")));

        let mut commands = Vec::new();

        // Memory maps may contain C-style macros and includes; expand them
        // before the linker sees the script.
        let script = match mem_map {
            Some(map) => {
                let scratch = output
                    .parent()
                    .unwrap_or_else(|| Path::new(""))
                    .join(LINK_SCRIPT_SCRATCH);
                let mut pre = vec![arg(&self.tools.cpp), "-E".to_string(), "-P".to_string()];
                pre.push(arg(map));
                pre.extend(self.flags.ld.iter().cloned());
                pre.extend(["-o".to_string(), arg(&scratch)]);
                commands.push(pre);
                Some(scratch)
            }
            None => None,
        };

        let map_file = output.with_extension("map");
        let mut cmd = vec![arg(&self.tools.ld)];
        cmd.extend(self.flags.ld.iter().cloned());
        cmd.extend([
            "-o".to_string(),
            arg(output),
            format!("-Wl,-Map={}", map_file.display()),
        ]);
        cmd.extend(objects.iter().map(|o| arg(o)));
        cmd.push("-Wl,--start-group".to_string());
        cmd.extend(libs.iter().cloned());
        cmd.push("-Wl,--end-group".to_string());
        for dir in lib_dirs {
            cmd.extend(["-L".to_string(), arg(dir)]);
        }
        if let Some(script) = &script {
            cmd.extend(["-T".to_string(), arg(script)]);
        }
        cmd.extend(libs);

        let mut cmd = apply(&self.hooks.linker, cmd);
        if let Some(writer) = self.writer() {
            let file = writer.write_response_file(ResponseFileKind::Link, &cmd[1..])?;
            cmd = vec![cmd[0].clone(), format!("@{}", file.display())];
        }
        commands.push(cmd);
        Ok(commands)
    }

    /// Build the command to archive objects into a static library.
    pub fn archive(&self, objects: &[PathBuf], lib_path: &Path) -> Result<Vec<CommandLine>> {
        let object_args: Vec<String> = objects.iter().map(|o| arg(o)).collect();
        let params = match self.writer() {
            Some(writer) => {
                let file = writer.write_response_file(ResponseFileKind::Archive, &object_args)?;
                vec![format!("@{}", file.display())]
            }
            None => object_args,
        };
        // "rcs": create, replace members, write an index.
        let mut cmd = vec![arg(&self.tools.ar), "rcs".to_string(), arg(lib_path)];
        cmd.extend(params);
        Ok(vec![apply(&self.hooks.archiver, cmd)])
    }

    /// Build the command to convert a linked ELF into a flashable image.
    ///
    /// The output format is keyed on the image extension; anything other
    /// than `.bin` or `.hex` is a caller error.
    pub fn binary(&self, elf: &Path, image: &Path) -> Result<Vec<CommandLine>> {
        let extension = image
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_string();
        let format = match extension.as_str() {
            "bin" => "binary",
            "hex" => "ihex",
            _ => {
                return Err(GccError::UnsupportedImageFormat {
                    path: image.to_path_buf(),
                    extension,
                })
            }
        };
        let cmd = vec![
            arg(&self.tools.objcopy),
            "-O".to_string(),
            format.to_string(),
            arg(elf),
            arg(image),
        ];
        Ok(vec![apply(&self.hooks.converter, cmd)])
    }
}
