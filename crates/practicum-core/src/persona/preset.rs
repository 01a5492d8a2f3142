//! Built-in preset personas.
//!
//! Five hand-written training cases covering the most common presenting
//! problems. These are served by [`crate::persona::StaticCatalog`] when the
//! application runs without a backend roster.

use super::model::{Persona, PersonaOrigin, PreviousSession};

/// Returns the built-in preset persona catalog.
pub fn preset_personas() -> Vec<Persona> {
    vec![
        Persona {
            id: "焦虑症状咨询".to_string(),
            name: "李明".to_string(),
            case_title: "焦虑症状咨询".to_string(),
            age: "28".to_string(),
            gender: "男".to_string(),
            occupation: "软件工程师".to_string(),
            description: "工作压力大，经常加班，最近出现焦虑症状".to_string(),
            personality: Some("内向、完美主义、责任心强".to_string()),
            marital_status: Some("未婚".to_string()),
            symptoms: vec![
                "失眠".to_string(),
                "心跳加速".to_string(),
                "担心工作表现".to_string(),
                "社交回避".to_string(),
            ],
            difficulty: "初级".to_string(),
            previous_sessions: vec![
                PreviousSession {
                    session: 1,
                    date: "2024-08-15".to_string(),
                    summary: "初诊，主要症状为工作焦虑和失眠".to_string(),
                },
                PreviousSession {
                    session: 2,
                    date: "2024-08-22".to_string(),
                    summary: "探讨了工作压力来源，学习了呼吸放松技巧".to_string(),
                },
            ],
            origin: PersonaOrigin::Preset,
        },
        Persona {
            id: "抑郁情绪疏导".to_string(),
            name: "王小雨".to_string(),
            case_title: "抑郁情绪疏导".to_string(),
            age: "24".to_string(),
            gender: "女".to_string(),
            occupation: "大学生".to_string(),
            description: "即将毕业，对未来感到迷茫，情绪低落".to_string(),
            personality: Some("敏感、善良、缺乏自信".to_string()),
            marital_status: Some("未婚".to_string()),
            symptoms: vec![
                "情绪低落".to_string(),
                "兴趣减退".to_string(),
                "自我价值感低".to_string(),
                "未来焦虑".to_string(),
            ],
            difficulty: "中级".to_string(),
            previous_sessions: vec![
                PreviousSession {
                    session: 1,
                    date: "2024-08-10".to_string(),
                    summary: "表达了对未来的担忧和无助感".to_string(),
                },
                PreviousSession {
                    session: 2,
                    date: "2024-08-17".to_string(),
                    summary: "探索了个人兴趣和价值观".to_string(),
                },
            ],
            origin: PersonaOrigin::Preset,
        },
        Persona {
            id: "人际关系困扰".to_string(),
            name: "张浩".to_string(),
            case_title: "人际关系困扰".to_string(),
            age: "32".to_string(),
            gender: "男".to_string(),
            occupation: "销售经理".to_string(),
            description: "在职场和家庭关系中都遇到困难".to_string(),
            personality: Some("外向但缺乏深度沟通技巧".to_string()),
            marital_status: Some("已婚".to_string()),
            symptoms: vec![
                "人际冲突".to_string(),
                "沟通困难".to_string(),
                "情绪控制问题".to_string(),
                "关系焦虑".to_string(),
            ],
            difficulty: "中级".to_string(),
            previous_sessions: vec![
                PreviousSession {
                    session: 1,
                    date: "2024-08-12".to_string(),
                    summary: "讨论了与同事的冲突问题".to_string(),
                },
                PreviousSession {
                    session: 2,
                    date: "2024-08-19".to_string(),
                    summary: "练习了积极沟通技巧".to_string(),
                },
            ],
            origin: PersonaOrigin::Preset,
        },
        Persona {
            id: "职场压力应对".to_string(),
            name: "刘芳".to_string(),
            case_title: "职场压力应对".to_string(),
            age: "35".to_string(),
            gender: "女".to_string(),
            occupation: "财务主管".to_string(),
            description: "工作责任重大，面临晋升压力".to_string(),
            personality: Some("认真负责、追求完美、容易焦虑".to_string()),
            marital_status: Some("已婚".to_string()),
            symptoms: vec![
                "工作焦虑".to_string(),
                "完美主义".to_string(),
                "身体疲劳".to_string(),
                "情绪波动".to_string(),
            ],
            difficulty: "中级".to_string(),
            previous_sessions: vec![
                PreviousSession {
                    session: 1,
                    date: "2024-08-14".to_string(),
                    summary: "探讨了完美主义对工作和生活的影响".to_string(),
                },
                PreviousSession {
                    session: 2,
                    date: "2024-08-21".to_string(),
                    summary: "学习了压力管理和时间规划技巧".to_string(),
                },
            ],
            origin: PersonaOrigin::Preset,
        },
        Persona {
            id: "家庭关系冲突".to_string(),
            name: "陈建国".to_string(),
            case_title: "家庭关系冲突".to_string(),
            age: "45".to_string(),
            gender: "男".to_string(),
            occupation: "中学教师".to_string(),
            description: "与青春期孩子关系紧张，夫妻沟通存在问题".to_string(),
            personality: Some("传统、固执、关心家庭但表达方式有问题".to_string()),
            marital_status: Some("已婚".to_string()),
            symptoms: vec![
                "家庭冲突".to_string(),
                "沟通障碍".to_string(),
                "情绪爆发".to_string(),
                "关系疏远".to_string(),
            ],
            difficulty: "高级".to_string(),
            previous_sessions: vec![
                PreviousSession {
                    session: 1,
                    date: "2024-08-13".to_string(),
                    summary: "讨论了与儿子的冲突和沟通问题".to_string(),
                },
                PreviousSession {
                    session: 2,
                    date: "2024-08-20".to_string(),
                    summary: "探索了家庭动力学和沟通模式".to_string(),
                },
            ],
            origin: PersonaOrigin::Preset,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_well_formed() {
        let presets = preset_personas();
        assert_eq!(presets.len(), 5);

        for persona in &presets {
            assert!(!persona.id.is_empty());
            assert!(!persona.symptoms.is_empty());
            assert_eq!(persona.origin, PersonaOrigin::Preset);
            assert_eq!(persona.previous_sessions.len(), 2);
        }
    }

    #[test]
    fn test_preset_ids_are_unique() {
        let presets = preset_personas();
        for (i, a) in presets.iter().enumerate() {
            for b in presets.iter().skip(i + 1) {
                assert_ne!(a.id, b.id);
            }
        }
    }
}
