#[cfg(test)]
pub mod test {
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::fs;
    use std::path::{Path, PathBuf};
    use std::rc::Rc;

    use tempfile::TempDir;

    use crate::builder::Templgen;
    use crate::error::TemplgenError;
    use crate::fs::{FileSystem, LocalFs};
    use crate::prompt::Prompt;
    use crate::settings::Settings;

    /// Answers questions from a fixed script and records what was asked.
    pub struct ScriptedPrompt {
        answers: RefCell<VecDeque<String>>,
        asked: Rc<RefCell<Vec<String>>>,
    }

    impl ScriptedPrompt {
        pub fn new(answers: &[&str]) -> Self {
            Self::with_log(answers, Rc::default())
        }

        fn with_log(answers: &[&str], asked: Rc<RefCell<Vec<String>>>) -> Self {
            Self {
                answers: RefCell::new(answers.iter().map(|a| a.to_string()).collect()),
                asked,
            }
        }

        pub fn asked(&self) -> Vec<String> {
            self.asked.borrow().clone()
        }
    }

    impl Prompt for ScriptedPrompt {
        fn prompt_line(&self, text: &str) -> Result<String, TemplgenError> {
            self.asked.borrow_mut().push(text.to_string());
            self.answers
                .borrow_mut()
                .pop_front()
                .ok_or_else(|| TemplgenError::PromptFailed(format!("no answer for {text:?}")))
        }
    }

    /// Real filesystem rooted at a fake home; commands are recorded, not run.
    pub struct RecordingFs {
        inner: LocalFs,
        commands: Rc<RefCell<Vec<Vec<String>>>>,
    }

    impl FileSystem for RecordingFs {
        fn home_dir(&self) -> Result<PathBuf, TemplgenError> {
            self.inner.home_dir()
        }

        fn dir_exists(&self, path: &Path) -> bool {
            self.inner.dir_exists(path)
        }

        fn file_exists(&self, path: &Path) -> bool {
            self.inner.file_exists(path)
        }

        fn create_path(&self, path: &Path) -> Result<(), TemplgenError> {
            self.inner.create_path(path)
        }

        fn remove_dir(&self, path: &Path) -> Result<(), TemplgenError> {
            self.inner.remove_dir(path)
        }

        fn copy_dir(&self, src: &Path, dst: &Path) -> Result<(), TemplgenError> {
            self.inner.copy_dir(src, dst)
        }

        fn list_subdirs(&self, path: &Path) -> Result<Vec<String>, TemplgenError> {
            self.inner.list_subdirs(path)
        }

        fn run_command(
            &self,
            argv: &[String],
            _env: &[(String, String)],
        ) -> Result<(), TemplgenError> {
            self.commands.borrow_mut().push(argv.to_vec());
            Ok(())
        }
    }

    /// A temporary home directory and an (uninitialized) project directory.
    pub struct Sandbox {
        _dir: TempDir,
        home: PathBuf,
        project: PathBuf,
        commands: Rc<RefCell<Vec<Vec<String>>>>,
        asked: Rc<RefCell<Vec<String>>>,
    }

    impl Sandbox {
        pub fn new() -> Self {
            let dir = TempDir::new().unwrap();
            let home = dir.path().join("home");
            let project = dir.path().join("project");
            fs::create_dir_all(&home).unwrap();
            fs::create_dir_all(&project).unwrap();
            Self {
                _dir: dir,
                home,
                project,
                commands: Rc::default(),
                asked: Rc::default(),
            }
        }

        pub fn home(&self) -> &Path {
            &self.home
        }

        pub fn project(&self) -> &Path {
            &self.project
        }

        pub fn file_system(&self) -> RecordingFs {
            RecordingFs {
                inner: LocalFs::with_home(&self.home),
                commands: Rc::clone(&self.commands),
            }
        }

        pub fn settings(&self) -> Settings {
            Settings::new(Box::new(self.file_system())).unwrap()
        }

        pub fn templgen(&self, answers: &[&str]) -> Templgen {
            Templgen::builder()
                .file_system(Box::new(self.file_system()))
                .prompt(Box::new(ScriptedPrompt::with_log(
                    answers,
                    Rc::clone(&self.asked),
                )))
                .build()
                .unwrap()
        }

        /// Write the global `main.cfg` verbatim.
        pub fn write_global(&self, content: &str) {
            write_config(&self.home, content);
        }

        /// Write the project's local `main.cfg` verbatim.
        pub fn write_local(&self, content: &str) {
            write_config(&self.project, content);
        }

        pub fn commands(&self) -> Vec<Vec<String>> {
            self.commands.borrow().clone()
        }

        pub fn asked(&self) -> Vec<String> {
            self.asked.borrow().clone()
        }
    }

    fn write_config(base: &Path, content: &str) {
        let root = base.join(".templgen");
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join("main.cfg"), content).unwrap();
    }

    #[test]
    fn sandbox_starts_uninitialized() {
        let sandbox = Sandbox::new();
        assert!(sandbox.home().is_dir());
        assert!(sandbox.project().is_dir());
        assert!(!sandbox.home().join(".templgen").exists());
        assert_eq!(sandbox.settings().home_dir(), sandbox.home());
    }

    #[test]
    fn scripted_prompt_runs_out() {
        let prompt = ScriptedPrompt::new(&[]);
        assert!(matches!(
            prompt.prompt_line("anything?"),
            Err(TemplgenError::PromptFailed(_))
        ));
    }
}
