use super::ManifestFormat;

/// How a manifest is searched for one dependency signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyMatcher {
    /// Case-insensitive substring search over the whole file.
    /// `label` defaults to `needle` when `None`.
    Text {
        needle: &'static str,
        label: Option<&'static str>,
    },
    /// Structured lookup: each `(package, technology)` pair hits when the
    /// manifest declares `package`.
    Keys {
        format: ManifestFormat,
        packages: &'static [(&'static str, &'static str)],
    },
}

/// One manifest rule: which root-level file to open, how to search it, and
/// which caller-defined category a hit lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DependencyRule {
    pub manifest: &'static str,
    pub matcher: DependencyMatcher,
    pub category: &'static str,
}

const fn text(
    manifest: &'static str,
    needle: &'static str,
    category: &'static str,
    label: &'static str,
) -> DependencyRule {
    DependencyRule {
        manifest,
        matcher: DependencyMatcher::Text {
            needle,
            label: Some(label),
        },
        category,
    }
}

pub static DEPENDENCY_RULES: &[(&str, &[DependencyRule])] = &[
    (
        "Java",
        &[
            text("pom.xml", "spring-boot", "backend", "Spring Boot"),
            text("pom.xml", "quarkus", "backend", "Quarkus"),
            text("pom.xml", "junit", "testing", "JUnit"),
            text("build.gradle", "spring-boot", "backend", "Spring Boot"),
            text("build.gradle", "quarkus", "backend", "Quarkus"),
            text("build.gradle", "junit", "testing", "JUnit"),
            DependencyRule {
                manifest: "pom.xml",
                matcher: DependencyMatcher::Keys {
                    format: ManifestFormat::Maven,
                    packages: &[
                        ("hibernate-core", "Hibernate"),
                        ("mysql-connector-java", "MySQL"),
                        ("mysql-connector-j", "MySQL"),
                        ("org.postgresql:postgresql", "PostgreSQL"),
                    ],
                },
                category: "database",
            },
            DependencyRule {
                manifest: "pom.xml",
                matcher: DependencyMatcher::Keys {
                    format: ManifestFormat::Maven,
                    packages: &[("mockito-core", "Mockito"), ("testng", "TestNG")],
                },
                category: "testing",
            },
        ],
    ),
    (
        "Python",
        &[
            text("requirements.txt", "django", "backend", "Django"),
            text("requirements.txt", "flask", "backend", "Flask"),
            text("requirements.txt", "fastapi", "backend", "FastAPI"),
            text("requirements.txt", "pytest", "testing", "pytest"),
            text("setup.py", "django", "backend", "Django"),
            text("setup.py", "flask", "backend", "Flask"),
            text("setup.py", "fastapi", "backend", "FastAPI"),
        ],
    ),
    (
        "Go",
        &[
            text("go.mod", "github.com/gin-gonic/gin", "backend", "Gin"),
            text("go.mod", "github.com/labstack/echo", "backend", "Echo"),
            text("go.mod", "gorm.io/gorm", "database", "GORM"),
            text("go.mod", "github.com/stretchr/testify", "testing", "Testify"),
        ],
    ),
    (
        "PHP",
        &[
            DependencyRule {
                manifest: "composer.json",
                matcher: DependencyMatcher::Keys {
                    format: ManifestFormat::Composer,
                    packages: &[
                        ("laravel/framework", "Laravel"),
                        ("symfony/symfony", "Symfony"),
                        ("symfony/framework-bundle", "Symfony"),
                    ],
                },
                category: "backend",
            },
            DependencyRule {
                manifest: "composer.json",
                matcher: DependencyMatcher::Keys {
                    format: ManifestFormat::Composer,
                    packages: &[("doctrine/orm", "Doctrine")],
                },
                category: "database",
            },
        ],
    ),
    (
        "Ruby",
        &[
            text("Gemfile", "rails", "backend", "Ruby on Rails"),
            text("Gemfile", "sinatra", "backend", "Sinatra"),
            text("Gemfile", "rspec", "testing", "RSpec"),
        ],
    ),
];

/// Manifest rules registered for `language`; empty when none are.
pub fn rules_for(language: &str) -> &'static [DependencyRule] {
    DEPENDENCY_RULES
        .iter()
        .find(|(lang, _)| *lang == language)
        .map(|(_, rules)| *rules)
        .unwrap_or(&[])
}

impl DependencyRule {
    /// Technology name reported for a text hit.
    pub fn text_label(&self) -> Option<&'static str> {
        match self.matcher {
            DependencyMatcher::Text { needle, label } => Some(label.unwrap_or(needle)),
            DependencyMatcher::Keys { .. } => None,
        }
    }
}
