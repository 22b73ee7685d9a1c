//! Common test utilities for autoreg integration tests

use std::path::PathBuf;

use assert_cmd::Command;
use tempfile::TempDir;

/// A test project for integration tests
#[allow(dead_code)]
pub struct TestWorkspace {
    /// Temporary directory
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Path to project root
    pub path: PathBuf,
}

#[allow(dead_code)]
impl TestWorkspace {
    /// Create a new, empty test project
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = dunce::canonicalize(temp.path()).expect("Failed to canonicalize temp directory");
        Self { temp, path }
    }

    /// A project with two apps under `src/App` covering every default pattern
    pub fn with_two_apps() -> Self {
        let workspace = Self::new();
        workspace.write_config("source_dir: src/App\n");

        workspace.write_file(
            "src/App/MyApp1/Commands/TestCommand1.php",
            &command_class("App\\MyApp1\\Commands", "TestCommand1", "test:test-command1"),
        );
        workspace.write_file(
            "src/App/MyApp1/Configs/test_config1.php",
            "<?php\n\nreturn [\n    'something' => 'x',\n];\n",
        );
        workspace.write_file("src/App/MyApp1/Routes/web.php", "<?php\n");
        workspace.write_file("src/App/MyApp1/Routes/api.php", "<?php\n");
        workspace.write_file("src/App/MyApp1/Routes/console.php", "<?php\n");
        workspace.write_file("src/App/MyApp1/Routes/channels.php", "<?php\n");
        workspace.write_file(
            "src/App/MyApp1/Providers/MyApp1ServiceProvider.php",
            "<?php\nnamespace App\\MyApp1\\Providers;\n\nuse Illuminate\\Support\\ServiceProvider;\n\nclass MyApp1ServiceProvider extends ServiceProvider {}\n",
        );
        workspace.write_file(
            "src/App/MyApp1/Database/Migrations/2021_01_01_000000_create_things.php",
            "<?php\n\nuse Illuminate\\Database\\Migrations\\Migration;\n\nreturn new class extends Migration {};\n",
        );
        workspace.write_file(
            "src/App/MyApp1/Resources/Lang/en/messages.php",
            "<?php\n\nreturn ['welcome' => 'Welcome'];\n",
        );
        workspace.write_file("src/App/MyApp1/Resources/Views/home.blade.php", "<div></div>\n");

        workspace.write_file(
            "src/App/MyApp2/Commands/TestCommand2.php",
            &command_class("App\\MyApp2\\Commands", "TestCommand2", "test:test-command2"),
        );
        workspace.write_file("src/App/MyApp2/Routes/web.php", "<?php\n");
        workspace
    }

    /// Write `autoreg.yaml` in the project root
    pub fn write_config(&self, yaml: &str) {
        self.write_file("autoreg.yaml", yaml);
    }

    /// Write a file in the project
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Read a file from the project
    pub fn read_file(&self, path: &str) -> String {
        let file_path = self.path.join(path);
        std::fs::read_to_string(&file_path).expect("Failed to read file")
    }

    /// Check if a file exists in the project
    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    /// Directory tests keep their cache in
    pub fn cache_dir(&self) -> PathBuf {
        self.path.join("bootstrap").join("cache")
    }
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

/// PHP source of a console command class
#[allow(dead_code)]
pub fn command_class(namespace: &str, class: &str, signature: &str) -> String {
    format!(
        "<?php\nnamespace {namespace};\n\nuse Illuminate\\Console\\Command;\n\nclass {class} extends Command\n{{\n    protected $signature = '{signature}';\n}}\n"
    )
}

/// The autoreg binary, isolated from the developer's environment
#[allow(dead_code, deprecated)]
pub fn autoreg_cmd() -> Command {
    let mut cmd = Command::cargo_bin("autoreg").unwrap();
    cmd.env_remove("AUTOREG_WORKSPACE");
    cmd.env_remove("AUTOREG_CONFIG");
    cmd.env_remove("AUTOREG_CACHE_DIR");
    cmd.env_remove("AUTOREG_LOG");
    cmd
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workspace_creation() {
        let workspace = TestWorkspace::new();
        assert!(workspace.path.exists());
    }

    #[test]
    fn test_workspace_file_operations() {
        let workspace = TestWorkspace::new();
        workspace.write_file("test/file.txt", "hello");
        assert!(workspace.file_exists("test/file.txt"));
        assert_eq!(workspace.read_file("test/file.txt"), "hello");
    }

    #[test]
    fn test_two_apps_fixture() {
        let workspace = TestWorkspace::with_two_apps();
        assert!(workspace.file_exists("autoreg.yaml"));
        assert!(workspace.file_exists("src/App/MyApp1/Commands/TestCommand1.php"));
        assert!(workspace.file_exists("src/App/MyApp2/Routes/web.php"));
    }
}
