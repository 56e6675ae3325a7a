use std::sync::OnceLock;

use super::{JobDescription, SalaryRange};

struct Posting {
    id: &'static str,
    title: &'static str,
    department: &'static str,
    level: &'static str,
    location: &'static str,
    description: &'static str,
    requirements: &'static [&'static str],
    skills: &'static [&'static str],
    responsibilities: &'static [&'static str],
    salary: (u32, u32),
    company_size: &'static str,
    industry: &'static str,
}

const POSTINGS: &[Posting] = &[
    Posting {
        id: "frontend-dev-senior",
        title: "Senior Frontend Developer",
        department: "Engineering",
        level: "Senior",
        location: "San Francisco, CA / Remote",
        description: "Build next-generation web applications that serve millions of users, \
            working closely with designers and engineers on the user experience.",
        requirements: &[
            "Some experience in frontend development (any level welcome)",
            "Basic knowledge of JavaScript and web technologies",
            "Willingness to learn React and modern frameworks",
        ],
        skills: &["JavaScript", "HTML", "CSS", "React", "Problem Solving"],
        responsibilities: &[
            "Develop and maintain frontend applications",
            "Collaborate with UX/UI designers",
            "Write clean, maintainable code",
            "Participate in code reviews",
        ],
        salary: (80_000, 120_000),
        company_size: "Series B Startup (100-500 employees)",
        industry: "Technology/SaaS",
    },
    Posting {
        id: "backend-dev-mid",
        title: "Backend Developer",
        department: "Engineering",
        level: "Mid-Level",
        location: "Austin, TX / Remote",
        description: "Build robust backend systems for a platform serving thousands of \
            businesses: microservices, API development and database optimization.",
        requirements: &[
            "Some programming experience (any language)",
            "Basic understanding of databases",
            "Interest in backend development",
        ],
        skills: &["Programming", "Problem Solving", "Databases", "APIs", "Learning Agility"],
        responsibilities: &[
            "Learn and develop backend services and APIs",
            "Work with databases and data management",
            "Collaborate with frontend developers",
        ],
        salary: (70_000, 100_000),
        company_size: "Mid-size Company (500-1000 employees)",
        industry: "Fintech",
    },
    Posting {
        id: "data-scientist-senior",
        title: "Data Scientist",
        department: "Data & Analytics",
        level: "Mid-Level",
        location: "New York, NY / Hybrid",
        description: "Turn customer and operations data into insights that shape product \
            and merchandising decisions.",
        requirements: &[
            "Some analytical or quantitative experience",
            "Familiarity with a programming or analysis tool",
        ],
        skills: &["Data Analysis", "Statistics", "Programming", "Problem Solving", "Communication"],
        responsibilities: &[
            "Analyze data to extract business insights",
            "Create reports and visualizations",
            "Present findings to stakeholders",
        ],
        salary: (80_000, 110_000),
        company_size: "Large Enterprise (1000+ employees)",
        industry: "E-commerce/Retail",
    },
    Posting {
        id: "product-manager-mid",
        title: "Product Manager",
        department: "Product",
        level: "Mid-Level",
        location: "Seattle, WA / Remote",
        description: "Own discovery and delivery for a B2B product line, working with \
            engineering, design and customers.",
        requirements: &[
            "Some product, project or business experience",
            "Strong communication skills",
        ],
        skills: &[
            "Communication",
            "Project Management",
            "Problem Solving",
            "User Focus",
            "Analytical Thinking",
        ],
        responsibilities: &[
            "Support product roadmap development",
            "Gather requirements from stakeholders",
            "Work with engineering teams on feature delivery",
        ],
        salary: (75_000, 105_000),
        company_size: "Growth Stage Startup (200-500 employees)",
        industry: "B2B SaaS",
    },
    Posting {
        id: "marketing-manager-senior",
        title: "Marketing Manager",
        department: "Marketing",
        level: "Mid-Level",
        location: "Los Angeles, CA / Hybrid",
        description: "Plan and run campaigns across social, content and paid channels for \
            a consumer brand.",
        requirements: &[
            "Some marketing, communications or creative experience",
            "Comfort with writing for different audiences",
        ],
        skills: &["Communication", "Creativity", "Social Media", "Writing", "Project Management"],
        responsibilities: &[
            "Support marketing campaign development",
            "Create and manage content for various channels",
            "Analyze campaign performance with guidance",
        ],
        salary: (60_000, 85_000),
        company_size: "Mid-size Company (300-800 employees)",
        industry: "Consumer Goods",
    },
    Posting {
        id: "devops-engineer-senior",
        title: "DevOps Engineer",
        department: "Engineering",
        level: "Mid-Level",
        location: "Denver, CO / Remote",
        description: "Keep cloud infrastructure and deployment pipelines healthy as the \
            platform scales.",
        requirements: &[
            "Some technical experience or strong interest in infrastructure",
            "Basic Linux familiarity",
        ],
        skills: &[
            "Technical Aptitude",
            "Problem Solving",
            "Linux Basics",
            "Learning Agility",
            "Attention to Detail",
        ],
        responsibilities: &[
            "Learn cloud infrastructure management",
            "Support deployment pipeline maintenance",
            "Monitor system performance with guidance",
        ],
        salary: (70_000, 95_000),
        company_size: "Series C Startup (500-1000 employees)",
        industry: "Cloud Infrastructure",
    },
    Posting {
        id: "ux-designer-mid",
        title: "UX Designer",
        department: "Design",
        level: "Mid-Level",
        location: "Portland, OR / Hybrid",
        description: "Research, prototype and test experiences for client products in a \
            design-led studio.",
        requirements: &["Any design experience or a portfolio", "Curiosity about users"],
        skills: &[
            "Design Thinking",
            "Creativity",
            "User Empathy",
            "Visual Communication",
            "Problem Solving",
        ],
        responsibilities: &[
            "Learn user research methods",
            "Create wireframes and basic prototypes",
            "Support usability testing activities",
        ],
        salary: (60_000, 85_000),
        company_size: "Design-focused Startup (100-300 employees)",
        industry: "Design/Creative Services",
    },
    Posting {
        id: "sales-director-senior",
        title: "Sales Representative",
        department: "Sales",
        level: "Mid-Level",
        location: "Chicago, IL / Hybrid",
        description: "Grow relationships with enterprise customers and help them adopt the \
            product suite.",
        requirements: &[
            "Any customer service or business experience",
            "Comfort speaking with customers",
        ],
        skills: &[
            "Communication",
            "Relationship Building",
            "Persuasion",
            "Goal Orientation",
            "Customer Service",
        ],
        responsibilities: &[
            "Learn sales processes and methodologies",
            "Engage with potential customers",
            "Maintain customer relationships",
        ],
        salary: (60_000, 100_000),
        company_size: "Enterprise Company (1000+ employees)",
        industry: "Enterprise Software",
    },
];

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl From<&Posting> for JobDescription {
    fn from(p: &Posting) -> Self {
        JobDescription {
            id: p.id.to_string(),
            title: p.title.to_string(),
            department: p.department.to_string(),
            level: p.level.to_string(),
            location: p.location.to_string(),
            employment_type: "Full-time".to_string(),
            description: p.description.to_string(),
            requirements: owned(p.requirements),
            skills: owned(p.skills),
            responsibilities: owned(p.responsibilities),
            min_score: 3,
            salary_range: Some(SalaryRange {
                min: p.salary.0,
                max: p.salary.1,
                currency: "USD".to_string(),
            }),
            company_size: p.company_size.to_string(),
            industry: p.industry.to_string(),
        }
    }
}

/// Every posting, in declaration order.
pub fn all() -> &'static [JobDescription] {
    static JOBS: OnceLock<Vec<JobDescription>> = OnceLock::new();
    JOBS.get_or_init(|| POSTINGS.iter().map(JobDescription::from).collect())
}

pub fn find(id: &str) -> Option<&'static JobDescription> {
    all().iter().find(|job| job.id == id)
}

pub fn search(keyword: &str) -> Vec<&'static JobDescription> {
    all().iter().filter(|job| job.matches_keyword(keyword)).collect()
}

pub fn by_department(department: &str) -> Vec<&'static JobDescription> {
    all()
        .iter()
        .filter(|job| job.department.eq_ignore_ascii_case(department))
        .collect()
}
