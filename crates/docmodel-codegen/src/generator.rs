use crate::{
    expand,
    schema::Schema,
    synth::{self, TypeOutput},
    CodegenError, Config, PreviousOutput, Result, TypeGraph,
};

use quote::ToTokens;

use std::{collections::HashSet, fs, io, path::Path};

const HEADER: &str = "// @generated by docmodel-codegen. Hooks, `collection_name` and added methods are kept on regeneration.\n";

/// One generator run over a set of input sources.
#[derive(Debug, Clone, Default)]
pub struct Generator {
    config: Config,
    sources: Vec<String>,
    previous: Option<String>,
}

impl Generator {
    pub fn new(config: Config) -> Generator {
        Generator {
            config,
            sources: vec![],
            previous: None,
        }
    }

    /// Adds an input source file.
    pub fn source(mut self, source: impl Into<String>) -> Generator {
        self.sources.push(source.into());
        self
    }

    /// Sets the output of the previous run.
    pub fn previous(mut self, previous: impl Into<String>) -> Generator {
        self.previous = Some(previous.into());
        self
    }

    /// Classifies the input and synthesizes the descriptors of every
    /// struct, without rendering them.
    pub fn synthesize(&self) -> Result<Vec<TypeOutput>> {
        self.prepare().map(|prepared| prepared.outputs)
    }

    /// Runs the generator and returns the new output file.
    pub fn generate(&self) -> Result<String> {
        let prepared = self.prepare()?;
        let runtime = self.config.runtime()?;

        let mut seen = HashSet::new();
        let items: Vec<_> = prepared
            .graph
            .passthrough()
            .chain(
                prepared
                    .previous
                    .iter()
                    .flat_map(|previous| previous.passthrough(&prepared.graph)),
            )
            .filter(|item| seen.insert(item.to_token_stream().to_string()))
            .collect();

        let tokens = expand::file(&prepared.outputs, &items, &runtime);

        tracing::debug!(
            structs = prepared.outputs.len(),
            copied = items.len(),
            "generated output"
        );

        Ok(format!("{HEADER}{tokens}\n"))
    }

    fn prepare(&self) -> Result<Prepared> {
        self.config.validate()?;

        let sources: Vec<&str> = self.sources.iter().map(String::as_str).collect();
        let graph = TypeGraph::from_sources(&sources, &self.config)?;
        let schema = Schema::from_graph(&graph, &self.config)?;
        let previous = self
            .previous
            .as_deref()
            .map(PreviousOutput::parse)
            .transpose()?;
        let outputs = synth::synthesize(&graph, &schema, previous.as_ref(), &self.config)?;

        Ok(Prepared {
            graph,
            previous,
            outputs,
        })
    }
}

struct Prepared {
    graph: TypeGraph,
    previous: Option<PreviousOutput>,
    outputs: Vec<TypeOutput>,
}

/// Reads `inputs` and the previous output at `previous`, if it exists, and
/// returns the new output. Intended for build scripts.
pub fn generate_from_files(
    inputs: &[impl AsRef<Path>],
    previous: Option<&Path>,
    config: &Config,
) -> Result<String> {
    let mut generator = Generator::new(config.clone());

    for input in inputs {
        generator = generator.source(read(input.as_ref())?);
    }

    if let Some(path) = previous {
        match fs::read_to_string(path) {
            Ok(source) => generator = generator.previous(source),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no previous output");
            }
            Err(source) => {
                return Err(CodegenError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        }
    }

    generator.generate()
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| CodegenError::Io {
        path: path.to_path_buf(),
        source,
    })
}
