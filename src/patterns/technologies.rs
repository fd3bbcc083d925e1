use super::{ManifestFormat, PatternSpec, TechCategory};
use std::collections::HashMap;

use super::TechCategory::{Backend, BuildTools, Database, Devops, Frontend, Testing};

/// Technologies worth probing for a project whose main language is `language`.
pub struct LanguageCatalog {
    pub language: &'static str,
    pub categories: &'static [(TechCategory, &'static [&'static str])],
}

pub static TECHNOLOGIES_BY_LANG: &[LanguageCatalog] = &[
    LanguageCatalog {
        language: "Java",
        categories: &[
            (Backend, &["Spring Boot", "Quarkus", "Micronaut", "Jakarta EE", "Play Framework", "Vert.x"]),
            (Database, &["Hibernate", "JPA", "MyBatis", "JDBC", "JOOQ", "MySQL", "PostgreSQL"]),
            (BuildTools, &["Maven", "Gradle", "Ant"]),
            (Testing, &["JUnit", "TestNG", "Mockito", "AssertJ"]),
            (Devops, &["Docker", "Kubernetes", "Jenkins"]),
        ],
    },
    LanguageCatalog {
        language: "C#",
        categories: &[
            (Backend, &["ASP.NET Core", ".NET Core", ".NET Framework", "Blazor", "Xamarin"]),
            (Database, &["Entity Framework", "Dapper", "ADO.NET", "NHibernate"]),
            (BuildTools, &["MSBuild", "NuGet", "Cake"]),
            (Testing, &["NUnit", "xUnit", "MSTest", "Moq"]),
            (Devops, &["Docker", "Azure DevOps", "Octopus Deploy"]),
        ],
    },
    LanguageCatalog {
        language: "Python",
        categories: &[
            (Backend, &["Django", "Flask", "FastAPI", "Pyramid", "Bottle", "Tornado"]),
            (Database, &["SQLAlchemy", "Django ORM", "Psycopg", "PyMySQL", "MongoEngine", "PostgreSQL", "MySQL"]),
            (BuildTools, &["pip", "Poetry", "Pipenv", "Setuptools"]),
            (Testing, &["pytest", "unittest", "nose", "Robot Framework"]),
            (Devops, &["Docker", "Fabric", "Ansible"]),
        ],
    },
    LanguageCatalog {
        language: "JavaScript",
        categories: &[
            (Backend, &["Express", "Koa", "NestJS", "Meteor", "Next.js"]),
            (Frontend, &["React", "Angular", "Vue", "Svelte", "Ember"]),
            (Database, &["Sequelize", "TypeORM", "Mongoose", "Prisma", "MySQL", "PostgreSQL"]),
            (BuildTools, &["npm", "yarn", "webpack", "vite"]),
            (Testing, &["Jest", "Mocha", "Jasmine", "Cypress"]),
            (Devops, &["PM2", "Docker"]),
        ],
    },
    LanguageCatalog {
        language: "TypeScript",
        categories: &[
            (Backend, &["NestJS", "Express", "LoopBack", "Next.js"]),
            (Frontend, &["Angular", "React", "Vue", "Svelte"]),
            (Database, &["TypeORM", "Prisma", "MikroORM"]),
            (BuildTools, &["tsc", "webpack", "esbuild", "npm", "yarn"]),
            (Testing, &["Jest", "Mocha", "Jasmine"]),
            (Devops, &["PM2", "Docker"]),
        ],
    },
    LanguageCatalog {
        language: "PHP",
        categories: &[
            (Backend, &["Laravel", "Symfony", "CodeIgniter", "Yii", "Zend"]),
            (Database, &["Eloquent ORM", "Doctrine", "PDO", "MySQL", "PostgreSQL"]),
            (BuildTools, &["Composer", "Phar"]),
            (Testing, &["PHPUnit", "Codeception", "PHPSpec"]),
            (Devops, &["Docker", "Deployer", "Capistrano"]),
        ],
    },
    LanguageCatalog {
        language: "Go",
        categories: &[
            (Backend, &["Gin", "Echo", "Fiber", "Beego"]),
            (Database, &["GORM", "SQLx", "Ent"]),
            (BuildTools, &["go build", "GoReleaser"]),
            (Testing, &["testing", "Testify", "GoConvey"]),
            (Devops, &["Docker", "Kubernetes"]),
        ],
    },
    LanguageCatalog {
        language: "Ruby",
        categories: &[
            (Backend, &["Ruby on Rails", "Sinatra", "Hanami"]),
            (Database, &["Active Record", "Sequel", "ROM"]),
            (BuildTools, &["Bundler", "Rake"]),
            (Testing, &["RSpec", "Minitest", "Cucumber"]),
            (Devops, &["Docker", "Capistrano", "Mina"]),
        ],
    },
    LanguageCatalog {
        language: "Swift",
        categories: &[
            (Backend, &["Vapor", "Perfect", "Kitura"]),
            (Database, &["Fluent", "GRDB", "Realm"]),
            (BuildTools, &["Swift Package Manager", "CocoaPods"]),
            (Testing, &["XCTest", "Quick", "Nimble"]),
            (Devops, &["Fastlane", "Xcode Server"]),
        ],
    },
    LanguageCatalog {
        language: "Kotlin",
        categories: &[
            (Backend, &["Ktor", "Spring Boot", "Micronaut", "Vert.x"]),
            (Database, &["Exposed", "JPA", "Hibernate"]),
            (BuildTools, &["Gradle", "Maven"]),
            (Testing, &["JUnit", "Kotest", "MockK"]),
            (Devops, &["Docker", "Kubernetes"]),
        ],
    },
    LanguageCatalog {
        language: "Rust",
        categories: &[
            (Backend, &["Actix", "Rocket", "Warp"]),
            (Database, &["Diesel", "SQLx", "SeaORM"]),
            (BuildTools, &["Cargo", "Rustup"]),
            (Testing, &["cargo test", "Mockall"]),
            (Devops, &["Docker", "Kubernetes"]),
        ],
    },
    LanguageCatalog {
        language: "Scala",
        categories: &[
            (Backend, &["Play", "Akka", "Lift"]),
            (Database, &["Slick", "Quill", "Doobie"]),
            (BuildTools, &["sbt", "Maven"]),
            (Testing, &["ScalaTest", "Specs2", "ScalaCheck"]),
            (Devops, &["Docker", "Kubernetes"]),
        ],
    },
];

/// Catalog for `language`, if one is registered.
pub fn catalog_for(language: &str) -> Option<&'static LanguageCatalog> {
    TECHNOLOGIES_BY_LANG.iter().find(|c| c.language == language)
}

/// A JavaScript technology recognised by its npm package names.
pub struct JsTechnology {
    pub name: &'static str,
    pub packages: &'static [&'static str],
    /// `frontend`, `backend` or `database`.
    pub kind: &'static str,
}

pub static JS_TECH_DETECTION: &[JsTechnology] = &[
    JsTechnology { name: "React", packages: &["react", "react-dom"], kind: "frontend" },
    JsTechnology { name: "Angular", packages: &["@angular/core"], kind: "frontend" },
    JsTechnology { name: "Vue", packages: &["vue"], kind: "frontend" },
    JsTechnology { name: "Express", packages: &["express"], kind: "backend" },
    JsTechnology { name: "NestJS", packages: &["@nestjs/core"], kind: "backend" },
    JsTechnology { name: "TypeORM", packages: &["typeorm"], kind: "database" },
];

lazy_static::lazy_static! {
    /// Checks per technology. A technology is present when any check hits.
    pub static ref TECHNOLOGY_DETECTORS: HashMap<&'static str, Vec<PatternSpec>> = {
        use PatternSpec as P;
        let mut m = HashMap::new();

        // Java / Kotlin
        m.insert("Spring Boot", vec![
            P::content("pom.xml", "spring-boot-starter"),
            P::content("build.gradle", "org.springframework.boot"),
            P::content("build.gradle.kts", "org.springframework.boot"),
            P::file("src/main/resources/application.properties"),
            P::file("src/main/resources/application.yml"),
            P::code(r"@SpringBootApplication"),
        ]);
        m.insert("Quarkus", vec![
            P::content("pom.xml", "quarkus"),
            P::content("build.gradle", "io.quarkus"),
            P::content("src/main/resources/application.properties", "quarkus"),
            P::code(r"@QuarkusMain"),
        ]);
        m.insert("Micronaut", vec![
            P::content("build.gradle", "io.micronaut"),
            P::content("pom.xml", "io.micronaut"),
        ]);
        m.insert("Ktor", vec![
            P::content("build.gradle.kts", "io.ktor"),
            P::content("build.gradle", "io.ktor"),
            P::code(r"import io\.ktor\."),
        ]);
        m.insert("Hibernate", vec![
            P::StructuredKey { manifest: "pom.xml", format: ManifestFormat::Maven, key: "hibernate-core" },
            P::content("build.gradle", "org.hibernate"),
            P::code(r"import org\.hibernate\."),
        ]);
        m.insert("JPA", vec![
            P::code(r"import (javax|jakarta)\.persistence\."),
        ]);
        m.insert("Maven", vec![P::file("pom.xml"), P::file("mvnw")]);
        m.insert("Gradle", vec![
            P::file("build.gradle"),
            P::file("build.gradle.kts"),
            P::file("gradlew"),
        ]);
        m.insert("JUnit", vec![
            P::content("pom.xml", "junit"),
            P::content("build.gradle", "junit"),
            P::code(r"import org\.junit"),
        ]);
        m.insert("Mockito", vec![
            P::StructuredKey { manifest: "pom.xml", format: ManifestFormat::Maven, key: "mockito-core" },
            P::code(r"import static org\.mockito\.|import org\.mockito\."),
        ]);

        // PHP
        m.insert("Laravel", vec![
            P::file("artisan"),
            P::content("composer.json", "laravel/framework"),
            P::dir("app/Http/Controllers"),
            P::code(r"use Illuminate\\"),
        ]);
        m.insert("Symfony", vec![
            P::file("bin/console"),
            P::content("composer.json", "symfony/framework-bundle"),
            P::dir("config/packages"),
            P::code(r"use Symfony\\"),
        ]);
        m.insert("CodeIgniter", vec![
            P::file("spark"),
            P::content("composer.json", "codeigniter4/framework"),
            P::code(r"use CodeIgniter\\"),
        ]);
        m.insert("Doctrine", vec![
            P::content("composer.json", "doctrine/orm"),
            P::code(r"use Doctrine\\ORM"),
        ]);
        m.insert("Composer", vec![
            P::file("composer.json"),
            P::file("composer.lock"),
        ]);
        m.insert("PHPUnit", vec![
            P::file("phpunit.xml"),
            P::file("phpunit.xml.dist"),
            P::content("composer.json", "phpunit/phpunit"),
        ]);

        // Python
        m.insert("Django", vec![
            P::file("manage.py"),
            P::content("requirements.txt", "Django"),
            P::file("**/settings.py"),
            P::code(r"from django\.|import django"),
        ]);
        m.insert("Flask", vec![
            P::content("requirements.txt", "Flask"),
            P::content("app.py", "Flask(__name__)"),
            P::code(r"from flask import"),
        ]);
        m.insert("FastAPI", vec![
            P::content("requirements.txt", "fastapi"),
            P::content("pyproject.toml", "fastapi"),
            P::code(r"from fastapi import"),
        ]);
        m.insert("SQLAlchemy", vec![
            P::content("requirements.txt", "SQLAlchemy"),
            P::content("requirements.txt", "sqlalchemy"),
            P::code(r"from sqlalchemy|import sqlalchemy"),
        ]);
        m.insert("Psycopg", vec![
            P::content("requirements.txt", "psycopg"),
            P::code(r"import psycopg"),
        ]);
        m.insert("pytest", vec![
            P::content("requirements.txt", "pytest"),
            P::file("pytest.ini"),
            P::file("conftest.py"),
            P::code(r"^import pytest"),
        ]);
        m.insert("pip", vec![P::file("requirements.txt")]);
        m.insert("Poetry", vec![
            P::file("poetry.lock"),
            P::content("pyproject.toml", "[tool.poetry]"),
        ]);
        m.insert("Pipenv", vec![P::file("Pipfile"), P::file("Pipfile.lock")]);
        m.insert("Setuptools", vec![
            P::file("setup.py"),
            P::file("setup.cfg"),
        ]);

        // JavaScript / TypeScript
        m.insert("Express", vec![
            P::content("package.json", "\"express\""),
            P::code(r#"require\(['"]express['"]\)|import express from"#),
        ]);
        m.insert("NestJS", vec![
            P::content("package.json", "@nestjs/core"),
            P::code(r"@(Controller|Injectable)\("),
        ]);
        m.insert("Next.js", vec![
            P::content("package.json", "\"next\""),
            P::file("next.config.js"),
            P::file("next.config.mjs"),
            P::code(r#"from ['"]next(/[a-z]+)?['"]"#),
        ]);
        m.insert("Koa", vec![P::content("package.json", "\"koa\"")]);
        m.insert("React", vec![
            P::content("package.json", "\"react\""),
            P::code(r"import React|React\.Component"),
        ]);
        m.insert("Angular", vec![
            P::content("package.json", "@angular/core"),
            P::file("angular.json"),
            P::code(r"@Component\("),
        ]);
        m.insert("Vue", vec![
            P::content("package.json", "\"vue\""),
            P::file("vue.config.js"),
        ]);
        m.insert("Svelte", vec![
            P::content("package.json", "\"svelte\""),
            P::file("svelte.config.js"),
        ]);
        m.insert("TypeORM", vec![
            P::content("package.json", "typeorm"),
            P::code(r"@Entity\("),
        ]);
        m.insert("Sequelize", vec![P::content("package.json", "\"sequelize\"")]);
        m.insert("Mongoose", vec![
            P::content("package.json", "\"mongoose\""),
            P::code(r#"require\(['"]mongoose['"]\)|from ['"]mongoose['"]"#),
        ]);
        m.insert("Prisma", vec![
            P::file("prisma/schema.prisma"),
            P::content("package.json", "@prisma/client"),
        ]);
        m.insert("npm", vec![P::file("package-lock.json")]);
        m.insert("yarn", vec![P::file("yarn.lock")]);
        m.insert("webpack", vec![
            P::file("webpack.config.js"),
            P::file("webpack.config.ts"),
        ]);
        m.insert("vite", vec![
            P::file("vite.config.js"),
            P::file("vite.config.ts"),
        ]);
        m.insert("esbuild", vec![P::content("package.json", "\"esbuild\"")]);
        m.insert("tsc", vec![P::file("tsconfig.json")]);
        m.insert("Jest", vec![
            P::file("jest.config.js"),
            P::file("jest.config.ts"),
            P::content("package.json", "\"jest\""),
        ]);
        m.insert("Mocha", vec![
            P::file(".mocharc.json"),
            P::file(".mocharc.yml"),
            P::content("package.json", "\"mocha\""),
        ]);
        m.insert("Cypress", vec![P::file("cypress.config.js"), P::file("cypress.json")]);
        m.insert("PM2", vec![
            P::file("ecosystem.config.js"),
            P::content("package.json", "\"pm2\""),
        ]);

        // C#
        m.insert("ASP.NET Core", vec![
            P::content("*.csproj", "Microsoft.AspNetCore"),
            P::dir("Controllers"),
            P::code(r"\[HttpGet\]|\[Route\("),
        ]);
        m.insert("Entity Framework", vec![P::content("**/*.csproj", "EntityFrameworkCore")]);
        m.insert("NuGet", vec![P::file("**/packages.config"), P::file("nuget.config")]);
        m.insert("xUnit", vec![P::content("**/*.csproj", "xunit")]);
        m.insert("NUnit", vec![P::content("**/*.csproj", "NUnit")]);

        // Ruby
        m.insert("Ruby on Rails", vec![
            P::content("Gemfile", "rails"),
            P::file("config/routes.rb"),
            P::dir("app/controllers"),
            P::code(r"class ApplicationController < ActionController::Base"),
        ]);
        m.insert("Sinatra", vec![
            P::content("Gemfile", "sinatra"),
            P::code(r"require ['\x22]sinatra"),
        ]);
        m.insert("Bundler", vec![P::file("Gemfile"), P::file("Gemfile.lock")]);
        m.insert("Rake", vec![P::file("Rakefile")]);
        m.insert("RSpec", vec![
            P::file(".rspec"),
            P::content("Gemfile", "rspec"),
            P::dir("spec"),
        ]);
        m.insert("Capistrano", vec![P::file("Capfile"), P::file("config/deploy.rb")]);

        // Go
        m.insert("Gin", vec![
            P::content("go.mod", "github.com/gin-gonic/gin"),
            P::code(r#""github\.com/gin-gonic/gin""#),
        ]);
        m.insert("Echo", vec![P::content("go.mod", "github.com/labstack/echo")]);
        m.insert("Fiber", vec![P::content("go.mod", "github.com/gofiber/fiber")]);
        m.insert("GORM", vec![P::content("go.mod", "gorm.io/gorm")]);
        m.insert("Testify", vec![P::content("go.mod", "github.com/stretchr/testify")]);
        m.insert("GoReleaser", vec![P::file(".goreleaser.yml"), P::file(".goreleaser.yaml")]);
        m.insert("go build", vec![P::file("go.mod")]);

        // Rust
        m.insert("Cargo", vec![P::file("Cargo.toml")]);
        m.insert("Actix", vec![P::content("Cargo.toml", "actix-web")]);
        m.insert("Rocket", vec![P::content("Cargo.toml", "rocket")]);
        m.insert("Warp", vec![P::content("Cargo.toml", "warp")]);
        m.insert("Diesel", vec![P::content("Cargo.toml", "diesel")]);

        // Databases
        m.insert("MySQL", vec![
            P::content(".env", "DB_CONNECTION=mysql"),
            P::code(r"mysql://|mysql2?\.createConnection"),
        ]);
        m.insert("PostgreSQL", vec![
            P::content(".env", "DB_CONNECTION=pgsql"),
            P::code(r"postgres(ql)?://|pg\.connect"),
        ]);

        // DevOps
        m.insert("Docker", vec![
            P::file("Dockerfile"),
            P::file("**/Dockerfile"),
            P::file("docker-compose.yml"),
            P::file("docker-compose.yaml"),
        ]);
        m.insert("Kubernetes", vec![
            P::dir("k8s"),
            P::dir("kubernetes"),
            P::dir("helm"),
            P::content("**/*.yaml", "kind: Deployment"),
        ]);
        m.insert("Jenkins", vec![P::file("Jenkinsfile")]);
        m.insert("Ansible", vec![P::file("ansible.cfg"), P::dir("playbooks")]);

        m
    };
}

/// Detector specs for `technology`; empty when none are registered.
pub fn detectors_for(technology: &str) -> &'static [PatternSpec] {
    TECHNOLOGY_DETECTORS
        .get(technology)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_patterns_compile_case_insensitive() {
        for (tech, specs) in TECHNOLOGY_DETECTORS.iter() {
            for spec in specs {
                if let PatternSpec::SourceRegex { pattern } = spec {
                    assert!(
                        regex::RegexBuilder::new(pattern)
                            .case_insensitive(true)
                            .build()
                            .is_ok(),
                        "{} has an invalid pattern",
                        tech
                    );
                }
            }
        }
    }

    #[test]
    fn test_catalogs_cover_detected_technologies() {
        let java = catalog_for("Java").unwrap();
        let names: Vec<&str> = java
            .categories
            .iter()
            .flat_map(|(_, techs)| techs.iter().copied())
            .collect();
        assert!(names.contains(&"Spring Boot"));
        assert!(!detectors_for("Spring Boot").is_empty());
        assert!(detectors_for("Unheard Of").is_empty());
        assert!(catalog_for("Brainfuck").is_none());
    }
}
