/// Well-known config file names and the literal substrings that reveal a
/// technology inside them.
pub static CONFIG_PATTERNS: &[(&str, &[(&str, &str)])] = &[
    (
        "application.properties",
        &[("spring.datasource", "Spring Boot"), ("quarkus.datasource", "Quarkus")],
    ),
    ("application.yml", &[("spring:", "Spring Boot"), ("quarkus:", "Quarkus")]),
    (
        "composer.json",
        &[("\"laravel/framework\"", "Laravel"), ("\"symfony/symfony\"", "Symfony")],
    ),
    (
        "package.json",
        &[("\"express\"", "Express"), ("\"next\"", "Next.js"), ("\"react\"", "React")],
    ),
    (
        "requirements.txt",
        &[("Django", "Django"), ("Flask", "Flask"), ("fastapi", "FastAPI")],
    ),
    (
        ".env",
        &[
            ("DB_CONNECTION=mysql", "MySQL"),
            ("DB_CONNECTION=pgsql", "PostgreSQL"),
            ("CACHE_DRIVER=redis", "Redis"),
        ],
    ),
];

/// Config technologies that belong in the database category when merged.
pub static DATABASE_TECHNOLOGIES: &[&str] = &["MySQL", "PostgreSQL", "Redis"];

/// File names treated as configuration by the secret scanner.
pub static CONFIG_FILES: &[&str] = &[
    ".env",
    ".env.local",
    ".env.prod",
    ".env.dev",
    ".project",
    "Jenkinsfile",
    "docker-compose.yml",
    "webpack.config.js",
    "tsconfig.json",
    "package.json",
    "build.gradle",
    "pom.xml",
    "composer.json",
    "go.mod",
    "Gemfile",
    "requirements.txt",
    "setup.py",
    "Makefile",
    "nginx.conf",
    "apache.conf",
    ".eslintrc",
    ".prettierrc",
    "babel.config.js",
    "jest.config.js",
    "application.properties",
    "application.yml",
    "settings.py",
    "wp-config.php",
];

/// Extensions treated as configuration by the secret scanner.
pub static CONFIG_EXTENSIONS: &[&str] = &[
    ".env",
    ".properties",
    ".yml",
    ".yaml",
    ".ini",
    ".conf",
    ".cfg",
    ".toml",
    ".json",
    ".xml",
];

/// Substring patterns registered for a config file name.
pub fn patterns_for(file_name: &str) -> Option<&'static [(&'static str, &'static str)]> {
    CONFIG_PATTERNS
        .iter()
        .find(|(name, _)| *name == file_name)
        .map(|(_, patterns)| *patterns)
}

/// Total number of configured substring patterns across all files.
pub fn total_patterns() -> usize {
    CONFIG_PATTERNS.iter().map(|(_, p)| p.len()).sum()
}

/// True for file names the secret scanner should inspect.
pub fn is_config_like(file_name: &str, extension: Option<&str>) -> bool {
    CONFIG_FILES.contains(&file_name)
        || file_name.starts_with(".env")
        || extension.map_or(false, |ext| CONFIG_EXTENSIONS.contains(&ext))
}
