//! The benchmark matrix: one shell invocation per tool and phase, plus the
//! artifact naming convention those invocations follow.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::identity::{Classifier, ToolIdentity};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Encrypt,
    Decrypt,
}

impl Phase {
    pub fn name(self) -> &'static str {
        match self {
            Phase::Encrypt => "encryption",
            Phase::Decrypt => "decryption",
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BenchmarkMatrix {
    pub safelock_cmd: String,
    pub passphrase: String,
    /// Directory (or file) every tool encrypts.
    pub input_path: String,
    /// Stem shared by every artifact: `test` gives `test.sla`, `test.gpg`, ...
    pub output_name: String,
    /// Scratch directory the decrypt phase extracts into.
    pub output_dir: String,
    /// Directory the harness runs in; artifacts are resolved against it.
    pub work_dir: PathBuf,
    pub tools: Vec<ToolIdentity>,
    /// age has no scriptable passphrase mode, so it uses an identity file.
    pub age_identity: Option<PathBuf>,
}

impl Default for BenchmarkMatrix {
    fn default() -> Self {
        Self {
            safelock_cmd: "safelock-cli".into(),
            passphrase: "123456789".into(),
            input_path: "test".into(),
            output_name: "test".into(),
            output_dir: "safelock_dump".into(),
            work_dir: PathBuf::from("."),
            tools: vec![
                ToolIdentity::Safelock,
                ToolIdentity::SafelockSha256,
                ToolIdentity::SafelockSha512,
                ToolIdentity::Gpgtar,
            ],
            age_identity: None,
        }
    }
}

impl BenchmarkMatrix {
    pub fn validate(&self) -> Result<()> {
        if self.tools.is_empty() {
            return Err(Error::Config("matrix has no tools".into()));
        }
        for (i, tool) in self.tools.iter().enumerate() {
            if self.tools[..i].contains(tool) {
                return Err(Error::Config(format!("tool {tool} listed twice")));
            }
        }
        if self.tools.contains(&ToolIdentity::Age) && self.age_identity.is_none() {
            return Err(Error::Config(
                "age requires `age_identity` (a key file from age-keygen)".into(),
            ));
        }
        if self.output_name.is_empty() || self.output_dir.is_empty() {
            return Err(Error::Config(
                "output_name and output_dir must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Every command and artifact name must classify back to its own tool.
    /// Configured text (passphrase, paths, command names) that contains a
    /// higher-priority pattern would otherwise relabel every bar.
    pub fn check_classifier(&self, classifier: &Classifier) -> Result<()> {
        for tool in &self.tools {
            let mut texts = vec![self.artifact_name(*tool)];
            for phase in [Phase::Encrypt, Phase::Decrypt] {
                texts.push(self.command(phase, *tool)?);
            }
            for text in texts {
                let resolved = classifier.classify(&text)?;
                if resolved != *tool {
                    return Err(Error::Config(format!(
                        "{text:?} is benchmarked as {tool} but classifies as {resolved}"
                    )));
                }
            }
        }
        Ok(())
    }

    /// Filename `identity` writes during the encryption phase.
    pub fn artifact_name(&self, identity: ToolIdentity) -> String {
        let out = &self.output_name;
        match identity {
            ToolIdentity::Safelock => format!("{out}.sla"),
            ToolIdentity::SafelockSha256 => format!("{out}_sha256.sla"),
            ToolIdentity::SafelockSha512 => format!("{out}_sha512.sla"),
            ToolIdentity::Gpgtar => format!("{out}.gpg"),
            ToolIdentity::SevenZip => format!("{out}.7z"),
            ToolIdentity::Age => format!("{out}.age"),
        }
    }

    pub fn artifact_path(&self, identity: ToolIdentity) -> PathBuf {
        self.work_dir.join(self.artifact_name(identity))
    }

    pub fn command(&self, phase: Phase, identity: ToolIdentity) -> Result<String> {
        match phase {
            Phase::Encrypt => self.encrypt_command(identity),
            Phase::Decrypt => self.decrypt_command(identity),
        }
    }

    pub fn commands(&self, phase: Phase) -> Result<Vec<String>> {
        self.tools.iter().map(|t| self.command(phase, *t)).collect()
    }

    pub fn encrypt_command(&self, identity: ToolIdentity) -> Result<String> {
        let pwd = &self.passphrase;
        let input = &self.input_path;
        let artifact = self.artifact_name(identity);
        let cmd = match identity {
            ToolIdentity::Safelock => self.safelock("encrypt", input, &artifact, ""),
            ToolIdentity::SafelockSha256 => {
                self.safelock("encrypt", input, &artifact, " --sha256")
            }
            ToolIdentity::SafelockSha512 => {
                self.safelock("encrypt", input, &artifact, " --sha512")
            }
            ToolIdentity::Gpgtar => format!(
                "gpgtar -e -o {artifact} -c --yes --batch --gpg-args \"--passphrase {pwd}\" {input}"
            ),
            ToolIdentity::SevenZip => format!("7z a -p{pwd} -mhe=on -y {artifact} {input}"),
            ToolIdentity::Age => {
                let key = self.age_key()?;
                format!("tar -cf - {input} | age --encrypt -i {key} -o {artifact}")
            }
        };
        Ok(cmd)
    }

    pub fn decrypt_command(&self, identity: ToolIdentity) -> Result<String> {
        let pwd = &self.passphrase;
        let dir = &self.output_dir;
        let artifact = self.artifact_name(identity);
        let cmd = match identity {
            ToolIdentity::Safelock => self.safelock("decrypt", &artifact, dir, ""),
            ToolIdentity::SafelockSha256 => self.safelock("decrypt", &artifact, dir, " --sha256"),
            ToolIdentity::SafelockSha512 => self.safelock("decrypt", &artifact, dir, " --sha512"),
            ToolIdentity::Gpgtar => format!(
                "gpgtar -d --yes --batch --directory {dir} --gpg-args \"--passphrase {pwd}\" {artifact}"
            ),
            ToolIdentity::SevenZip => format!("7z x -p{pwd} -o{dir} -y {artifact}"),
            ToolIdentity::Age => {
                let key = self.age_key()?;
                format!("age --decrypt -i {key} {artifact} | tar -xf - -C {dir}")
            }
        };
        Ok(cmd)
    }

    fn safelock(&self, action: &str, from: &str, to: &str, flags: &str) -> String {
        format!(
            "echo \"{}\" | {} {action} {from} {to} --quiet{flags}",
            self.passphrase, self.safelock_cmd
        )
    }

    fn age_key(&self) -> Result<String> {
        self.age_identity
            .as_deref()
            .map(|p: &Path| p.display().to_string())
            .ok_or_else(|| Error::Config("age requires `age_identity`".into()))
    }
}
