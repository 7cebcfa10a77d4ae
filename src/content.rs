//! Static page copy.

pub struct SkillCategory {
    pub name: &'static str,
    pub icon: &'static str,
    pub skills: &'static [&'static str],
}

pub struct Certification {
    pub issuer: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub date: &'static str,
}

pub struct Education {
    pub period: &'static str,
    pub degree: &'static str,
    pub institution: &'static str,
    pub grade: &'static str,
}

pub struct Role {
    pub title: &'static str,
    pub company: &'static str,
    pub period: &'static str,
    pub description: &'static str,
    pub tags: &'static [&'static str],
}

pub struct Project {
    pub title: &'static str,
    pub description: &'static str,
    pub link: &'static str,
    pub thumbnail: Option<&'static str>,
    pub tags: &'static [&'static str],
}

pub struct SocialLink {
    pub label: &'static str,
    pub href: &'static str,
}

pub const HERO_VIDEO: &str = "assets/final_quill.mp4";
pub const PORTRAIT: &str = "assets/keer.jpg";
pub const RESUME: &str = "assets/resume.png";

pub const ABOUT_PARAGRAPHS: [&str; 2] = [
    "Full-stack development enthusiast with a secondary focus in finance, currently pursuing B.Tech CSE (3rd year) at SRM University-AP. I explore AI/ML, IoT, and DevOps with a curiosity-driven approach, focusing on building simple, meaningful, and user-centered solutions.",
    "I bring adaptability, continuous learning, and clarity to every project, aiming to create work that is practical and impactful.",
];

pub const CONTACT_LEAD: &str = "Every great story deserves a conversation. Whether you're looking to collaborate on a project, discuss opportunities, or simply connect, I'd love to hear from you.";
pub const SIGNATURE: &str = "~ Keerthi Tadikonda";

pub const SKILL_CATEGORIES: &[SkillCategory] = &[
    SkillCategory {
        name: "Languages",
        icon: "💻",
        skills: &["C", "C++", "Python", "Java", "JavaScript", "HTML/CSS", "PHP", "SQL"],
    },
    SkillCategory {
        name: "Frameworks & Libraries",
        icon: "📚",
        skills: &["React.js", "Flask", "pandas", "matplotlib", "spaCy", "Sentence Transformers"],
    },
    SkillCategory {
        name: "Developer Tools",
        icon: "🛠",
        skills: &["Git", "VS Code", "Google Colab", "Power BI", "Excel", "Google Sheets", "Docker"],
    },
    SkillCategory {
        name: "Databases",
        icon: "🗄",
        skills: &["MongoDB", "MySQL"],
    },
    SkillCategory {
        name: "Concepts",
        icon: "🧠",
        skills: &["Data Structures", "Algorithms (DSA)", "Machine Learning", "NLP"],
    },
    SkillCategory {
        name: "Soft Skills",
        icon: "🤝",
        skills: &["Communication", "Problem-Solving", "Teamwork", "Leadership", "Consistency"],
    },
];

pub const CERTIFICATIONS: &[Certification] = &[
    Certification {
        issuer: "Coursera",
        title: "Machine Learning Specialization",
        description: "A deep dive into machine learning from Stanford University, covering everything from linear regression to neural networks.",
        date: "Dated this year 2025",
    },
    Certification {
        issuer: "Oracle",
        title: "Generative AI Professional",
        description: "Recognizing proficiency in Large Language Models, RAG, semantic search, and OCI GenAI Services.",
        date: "Dated this year 2025",
    },
    Certification {
        issuer: "HackerRank",
        title: "Problem Solving (Advanced)",
        description: "Achieved an advanced rating in competitive programming, solving complex algorithmic challenges.",
        date: "Dated this year 2025",
    },
];

pub const EDUCATION: &[Education] = &[
    Education {
        period: "2023 - present",
        degree: "B.Tech CSE",
        institution: "SRM AP University",
        grade: "GPA: 8.98/10",
    },
    Education {
        period: "2023",
        degree: "Class 12th",
        institution: "Bhashyam",
        grade: "GPA: 9.73/10",
    },
];

pub const EXPERIENCE: &[Role] = &[Role {
    title: "Salesforce Developer Intern",
    company: "Smartbridge",
    period: "May 2025 - July 2025",
    description: "Worked on customizing Salesforce applications using Apex, Visualforce, and Lightning Web Components. Assisted in integrating third-party APIs, building automation with Flows and Process Builder, and deploying changes via Change Sets. Collaborated with cross-functional teams to gather requirements and deliver scalable CRM solutions.",
    tags: &["Salesforce", "Apex", "Visualforce", "Lightning", "Flows"],
}];

pub const PROJECTS: &[Project] = &[
    Project {
        title: "ATS Resume Checker",
        description: "A full-stack AI platform for resume optimization. It provides detailed match scores, skill analysis, and an ATS-friendly resume builder.",
        link: "https://github.com/keerthi-1118/ats_resume_checker",
        thumbnail: Some("images/ats.jpg"),
        tags: &["React", "Flask", "Python", "NLP", "spaCy"],
    },
    Project {
        title: "Cloud Buddy",
        description: "A lightweight weather app using WeatherAPI and Pexels API for dynamic backgrounds, providing real-time weather and a 3-day forecast.",
        link: "https://github.com/keerthi-1118/Live-weather-",
        thumbnail: Some("images/cloudy.jpg"),
        tags: &["HTML", "CSS", "JavaScript", "Bootstrap", "WeatherAPI"],
    },
    Project {
        title: "EduSpace",
        description: "Currently developing EduSpace, an AI-powered space for students to upload notes, organize projects, and work together in real time.",
        link: "https://github.com/keerthi-1118",
        thumbnail: Some("images/edu.png"),
        tags: &["React", "Flask", "JWT", "Docker", "Material UI"],
    },
];

pub const SOCIAL_LINKS: &[SocialLink] = &[
    SocialLink {
        label: "Email",
        href: "mailto:keerthitadikonda62@gmail.com",
    },
    SocialLink {
        label: "GitHub",
        href: "https://github.com/keerthi-1118",
    },
    SocialLink {
        label: "LinkedIn",
        href: "https://www.linkedin.com/in/tadikonda-keerthi/",
    },
];

pub fn footer_text(year: u32) -> String {
    format!("© {year} The Burnt Letter. Crafted with care and nostalgia.")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn skill_lists_have_no_duplicates() {
        for category in SKILL_CATEGORIES {
            let unique: HashSet<_> = category.skills.iter().collect();
            assert_eq!(unique.len(), category.skills.len(), "{}", category.name);
        }
    }

    #[test]
    fn external_links_are_absolute() {
        for project in PROJECTS {
            assert!(url::Url::parse(project.link).is_ok(), "{}", project.title);
        }
        for link in SOCIAL_LINKS {
            assert!(url::Url::parse(link.href).is_ok(), "{}", link.label);
        }
    }

    #[test]
    fn media_paths_live_in_the_copied_assets_dir() {
        let index = include_str!("../index.html");
        assert!(index.contains(r#"rel="copy-dir" href="assets""#));

        for path in [HERO_VIDEO, PORTRAIT, RESUME] {
            assert!(path.starts_with("assets/"), "{path}");
        }
    }

    #[test]
    fn footer_carries_the_year() {
        assert_eq!(
            footer_text(2026),
            "© 2026 The Burnt Letter. Crafted with care and nostalgia."
        );
    }
}
