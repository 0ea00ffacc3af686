// 静态插件种子表
// 已知插件的不可变定义，在注册表构造时注入；扫描发现的 manifest
// 与这里的同 id 条目按优先级规则合并

use super::descriptor::{PluginCategory, PluginDescriptor, PluginKind};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn entry(
    id: &str,
    name: &str,
    kind: PluginKind,
    category: PluginCategory,
    description: &str,
) -> PluginDescriptor {
    PluginDescriptor {
        id: id.to_string(),
        name: name.to_string(),
        version: None,
        description: description.to_string(),
        author: String::new(),
        kind,
        category,
        commands: Vec::new(),
        triggers: Vec::new(),
        integrations: Vec::new(),
        api_required: Vec::new(),
        prompt_examples: Vec::new(),
        enabled: true,
        installed: true,
        registered_at: None,
    }
}

/// 默认种子表，顺序即注册表的解析顺序
pub fn default_seed() -> Vec<PluginDescriptor> {
    vec![
        // ===== 内置插件 =====
        PluginDescriptor {
            commands: strings(&["app:toggle-backlinks"]),
            triggers: strings(&["backlinks", "links de volta", "quem linka", "referências"]),
            integrations: strings(&["dataview", "omnisearch"]),
            prompt_examples: strings(&[
                "mostrar backlinks",
                "quem linka para esta nota",
                "ver referências",
            ]),
            ..entry(
                "backlinks",
                "Backlinks",
                PluginKind::Native,
                PluginCategory::Navigation,
                "Mostra links que apontam para a nota atual",
            )
        },
        PluginDescriptor {
            commands: strings(&["canvas:new-file", "canvas:convert-to-file"]),
            triggers: strings(&["canvas", "quadro", "mapa mental", "diagrama"]),
            integrations: strings(&["excalidraw"]),
            prompt_examples: strings(&["criar canvas", "novo quadro", "abrir canvas"]),
            ..entry(
                "canvas",
                "Canvas",
                PluginKind::Native,
                PluginCategory::Visual,
                "Cria quadros visuais para organizar notas e ideias",
            )
        },
        PluginDescriptor {
            commands: strings(&["note-composer:merge-file", "note-composer:split-file"]),
            triggers: strings(&["mesclar", "dividir", "juntar notas", "separar nota"]),
            prompt_examples: strings(&["mesclar notas", "dividir nota", "juntar arquivos"]),
            ..entry(
                "note-composer",
                "Compositor de Notas",
                PluginKind::Native,
                PluginCategory::Editing,
                "Mescla e divide notas",
            )
        },
        PluginDescriptor {
            triggers: strings(&["preview", "espiar", "visualizar link"]),
            ..entry(
                "page-preview",
                "Espiar Página",
                PluginKind::Native,
                PluginCategory::Navigation,
                "Mostra preview de links ao passar o mouse",
            )
        },
        PluginDescriptor {
            commands: strings(&["templates:insert-template"]),
            triggers: strings(&["template", "modelo", "inserir modelo"]),
            integrations: strings(&["templater-obsidian"]),
            prompt_examples: strings(&["inserir template", "usar modelo", "aplicar template"]),
            ..entry(
                "templates",
                "Modelos",
                PluginKind::Native,
                PluginCategory::Productivity,
                "Insere templates em notas",
            )
        },
        PluginDescriptor {
            commands: strings(&["switcher:open"]),
            triggers: strings(&["abrir nota", "ir para", "navegar", "buscar nota"]),
            integrations: strings(&["omnisearch"]),
            prompt_examples: strings(&["abrir nota X", "ir para nota", "navegar para"]),
            ..entry(
                "switcher",
                "Navegação Rápida",
                PluginKind::Native,
                PluginCategory::Navigation,
                "Abre notas rapidamente pelo nome",
            )
        },
        PluginDescriptor {
            commands: strings(&[
                "daily-notes:open",
                "daily-notes:open-prev",
                "daily-notes:open-next",
            ]),
            triggers: strings(&["nota de hoje", "diário", "daily note", "nota diária", "hoje"]),
            integrations: strings(&["templater-obsidian", "tasks"]),
            prompt_examples: strings(&[
                "abrir nota de hoje",
                "criar nota diária",
                "nota de ontem",
                "nota de amanhã",
            ]),
            ..entry(
                "daily-notes",
                "Notas Diárias",
                PluginKind::Native,
                PluginCategory::Productivity,
                "Cria e gerencia notas diárias",
            )
        },
        PluginDescriptor {
            commands: strings(&["command-palette:open"]),
            triggers: strings(&["comandos", "paleta", "ctrl+p"]),
            integrations: strings(&["cmdr"]),
            prompt_examples: strings(&["abrir paleta de comandos", "mostrar comandos"]),
            ..entry(
                "command-palette",
                "Paleta de Comandos",
                PluginKind::Native,
                PluginCategory::Navigation,
                "Acessa todos os comandos do Obsidian",
            )
        },
        PluginDescriptor {
            commands: strings(&["file-recovery:open"]),
            triggers: strings(&["recuperar", "versão anterior", "histórico", "backup"]),
            prompt_examples: strings(&["recuperar nota", "ver histórico", "versão anterior"]),
            ..entry(
                "file-recovery",
                "Recuperação de Arquivos",
                PluginKind::Native,
                PluginCategory::Utility,
                "Recupera versões anteriores de notas",
            )
        },
        PluginDescriptor {
            commands: strings(&["sync:view-version-history"]),
            triggers: strings(&["sincronizar", "sync", "backup nuvem"]),
            prompt_examples: strings(&["sincronizar vault", "ver histórico de sync"]),
            ..entry(
                "sync",
                "Sincronização",
                PluginKind::Native,
                PluginCategory::Utility,
                "Sincroniza vault entre dispositivos",
            )
        },
        PluginDescriptor {
            triggers: strings(&["publicar", "web", "publish"]),
            prompt_examples: strings(&["publicar nota"]),
            ..entry(
                "publish",
                "Visualizador Web",
                PluginKind::Native,
                PluginCategory::Utility,
                "Publica notas na web",
            )
        },
        // ===== 社区插件 =====
        PluginDescriptor {
            commands: strings(&["obsidian-admonition:insert-admonition"]),
            triggers: strings(&["admonition", "callout", "destaque", "aviso", "nota", "dica"]),
            prompt_examples: strings(&[
                "inserir callout",
                "criar admonition",
                "adicionar aviso",
            ]),
            ..entry(
                "obsidian-admonition",
                "Admonition",
                PluginKind::Community,
                PluginCategory::Visual,
                "Callouts e blocos de destaque aprimorados",
            )
        },
        PluginDescriptor {
            commands: strings(&[
                "ai-commander:generate-text",
                "ai-commander:generate-image",
                "ai-commander:transcribe-audio",
            ]),
            triggers: strings(&[
                "ai commander",
                "chatgpt",
                "gerar texto",
                "transcrever",
                "gerar imagem",
            ]),
            integrations: strings(&["obsidian-textgenerator-plugin", "chat-with-bard"]),
            api_required: strings(&["openai"]),
            prompt_examples: strings(&[
                "gerar texto com IA",
                "transcrever áudio",
                "criar imagem com IA",
            ]),
            ..entry(
                "ai-commander",
                "AI Commander",
                PluginKind::Community,
                PluginCategory::Ai,
                "Integração com OpenAI/ChatGPT para transcrição, imagens e texto",
            )
        },
        PluginDescriptor {
            commands: strings(&["obsidian42-brat:BRAT-AddBetaPlugin"]),
            triggers: strings(&["brat", "plugin beta", "instalar beta"]),
            prompt_examples: strings(&["instalar plugin beta", "adicionar plugin via BRAT"]),
            ..entry(
                "obsidian42-brat",
                "BRAT",
                PluginKind::Community,
                PluginCategory::Utility,
                "Instala plugins beta para testes",
            )
        },
        PluginDescriptor {
            commands: strings(&["browser-interface:save-tabs"]),
            triggers: strings(&["browser", "navegador", "abas", "tabs"]),
            integrations: strings(&["open-gate"]),
            prompt_examples: strings(&["salvar abas do navegador", "importar tabs"]),
            ..entry(
                "browser-interface",
                "Browser Interface",
                PluginKind::Community,
                PluginCategory::Integration,
                "Salva e reabre abas do navegador no vault",
            )
        },
        PluginDescriptor {
            commands: strings(&["cmdr:open-commander"]),
            triggers: strings(&["commander", "macro", "comando personalizado", "atalho"]),
            integrations: strings(&["command-palette"]),
            prompt_examples: strings(&[
                "criar macro",
                "adicionar comando",
                "configurar atalho",
            ]),
            ..entry(
                "cmdr",
                "Commander",
                PluginKind::Community,
                PluginCategory::Productivity,
                "Cria macros e adiciona comandos personalizados",
            )
        },
        PluginDescriptor {
            triggers: strings(&["dataview", "consulta", "query", "tabela", "lista dinâmica"]),
            integrations: strings(&["obsidian-tasks-plugin", "templater-obsidian"]),
            prompt_examples: strings(&[
                "criar consulta dataview",
                "listar notas com tag X",
                "mostrar tarefas pendentes",
            ]),
            ..entry(
                "dataview",
                "Dataview",
                PluginKind::Community,
                PluginCategory::Data,
                "Consultas e visualizações de dados complexas",
            )
        },
        PluginDescriptor {
            commands: strings(&[
                "obsidian-excalidraw-plugin:excalidraw-new",
                "obsidian-excalidraw-plugin:excalidraw-open",
            ]),
            triggers: strings(&["excalidraw", "desenho", "diagrama", "sketch", "rabisco"]),
            integrations: strings(&["canvas"]),
            prompt_examples: strings(&["criar desenho", "novo excalidraw", "abrir diagrama"]),
            ..entry(
                "obsidian-excalidraw-plugin",
                "Excalidraw",
                PluginKind::Community,
                PluginCategory::Visual,
                "Editor de desenhos e diagramas",
            )
        },
        PluginDescriptor {
            commands: strings(&["chat-with-bard:open-chat"]),
            triggers: strings(&["gemini", "bard", "google ai", "chat gemini"]),
            integrations: strings(&["ai-commander", "obsidian-textgenerator-plugin"]),
            api_required: strings(&["gemini"]),
            prompt_examples: strings(&["abrir chat gemini", "perguntar ao gemini"]),
            ..entry(
                "chat-with-bard",
                "Gemini AI Assistant",
                PluginKind::Community,
                PluginCategory::Ai,
                "Integração com Google Gemini",
            )
        },
        PluginDescriptor {
            triggers: strings(&["api", "rest", "automação", "integração externa"]),
            // 通配符：通过 API 与一切集成
            integrations: strings(&["*"]),
            prompt_examples: strings(&["usar api do obsidian", "automação via api"]),
            ..entry(
                "obsidian-local-rest-api",
                "Local REST API",
                PluginKind::Community,
                PluginCategory::Integration,
                "API REST para automação externa do Obsidian",
            )
        },
        PluginDescriptor {
            commands: strings(&[
                "obsidian-tasks-plugin:toggle-done",
                "obsidian-tasks-plugin:create-or-edit-task",
            ]),
            triggers: strings(&["tarefa", "task", "todo", "pendente", "concluir", "prazo"]),
            integrations: strings(&["dataview", "daily-notes", "templater-obsidian"]),
            prompt_examples: strings(&[
                "criar tarefa",
                "listar tarefas pendentes",
                "marcar como concluída",
                "tarefas de hoje",
            ]),
            ..entry(
                "obsidian-tasks-plugin",
                "Tasks",
                PluginKind::Community,
                PluginCategory::Productivity,
                "Gerenciamento avançado de tarefas com datas e recorrência",
            )
        },
        PluginDescriptor {
            commands: strings(&[
                "obsidian-textgenerator-plugin:generate-text",
                "obsidian-textgenerator-plugin:generate-text-with-metadata",
            ]),
            triggers: strings(&["gerar texto", "text generator", "completar", "expandir"]),
            integrations: strings(&["ai-commander", "chat-with-bard"]),
            api_required: strings(&["openai", "gemini"]),
            prompt_examples: strings(&["gerar texto", "completar parágrafo", "expandir ideia"]),
            ..entry(
                "obsidian-textgenerator-plugin",
                "Text Generator",
                PluginKind::Community,
                PluginCategory::Ai,
                "Geração de texto com IA",
            )
        },
        PluginDescriptor {
            commands: strings(&["omnisearch:show-modal"]),
            triggers: strings(&["buscar", "pesquisar", "encontrar", "search", "omnisearch"]),
            integrations: strings(&["switcher", "backlinks"]),
            prompt_examples: strings(&["buscar no vault", "pesquisar termo", "encontrar nota"]),
            ..entry(
                "omnisearch",
                "Omnisearch",
                PluginKind::Community,
                PluginCategory::Search,
                "Busca avançada que funciona",
            )
        },
        PluginDescriptor {
            commands: strings(&["open-gate:open-gate"]),
            triggers: strings(&["open gate", "incorporar site", "embed", "website"]),
            integrations: strings(&["browser-interface"]),
            prompt_examples: strings(&["abrir site no obsidian", "incorporar página"]),
            ..entry(
                "open-gate",
                "Open Gate",
                PluginKind::Community,
                PluginCategory::Integration,
                "Incorpora websites no Obsidian",
            )
        },
        PluginDescriptor {
            commands: strings(&[
                "pane-relief:go-prev",
                "pane-relief:go-next",
                "pane-relief:go-1st",
                "pane-relief:go-last",
            ]),
            triggers: strings(&["painel", "aba", "navegar", "próximo", "anterior"]),
            prompt_examples: strings(&["ir para próxima aba", "voltar painel anterior"]),
            ..entry(
                "pane-relief",
                "Pane Relief",
                PluginKind::Community,
                PluginCategory::Navigation,
                "Navegação avançada entre painéis e abas",
            )
        },
        PluginDescriptor {
            commands: strings(&[
                "templater-obsidian:insert-templater",
                "templater-obsidian:create-new-note-from-template",
            ]),
            triggers: strings(&[
                "templater",
                "template avançado",
                "modelo js",
                "criar nota template",
            ]),
            integrations: strings(&["templates", "daily-notes", "dataview"]),
            prompt_examples: strings(&[
                "inserir template",
                "criar nota com template",
                "aplicar templater",
            ]),
            ..entry(
                "templater-obsidian",
                "Templater",
                PluginKind::Community,
                PluginCategory::Productivity,
                "Templates avançados com JavaScript",
            )
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_ids_unique() {
        let seed = default_seed();
        let mut ids: Vec<&str> = seed.iter().map(|p| p.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), seed.len());
    }

    #[test]
    fn test_seed_triggers_lowercase() {
        for plugin in default_seed() {
            for trigger in &plugin.triggers {
                assert_eq!(trigger, &trigger.to_lowercase(), "插件 {}", plugin.id);
            }
        }
    }

    #[test]
    fn test_native_plugins_present() {
        let seed = default_seed();
        let natives = seed.iter().filter(|p| p.kind == PluginKind::Native).count();
        assert_eq!(natives, 11);
        assert!(seed.iter().any(|p| p.id == "daily-notes"));
    }
}
