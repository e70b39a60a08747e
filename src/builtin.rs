//! Catalog compiled into the binary: the Spanish FAQ of the company site.

use crate::model::{FaqEntry, KeywordRule};

pub const FALLBACK_PREFIX: &str = "Lo siento, solo puedo responder preguntas específicas. \
    Por favor, selecciona una de las preguntas sugeridas o pregunta sobre";

pub const GREETING: &str = "¡Hola! 👋 Soy tu asistente virtual. Puedo responder preguntas sobre \
    nuestros servicios. Aquí tienes algunas preguntas frecuentes:";

fn entry(
    id: &str,
    question: &str,
    answer: &str,
    icon: &str,
    category: &str,
    topic: &str,
) -> FaqEntry {
    FaqEntry {
        id: id.to_string(),
        question: question.to_string(),
        answer: answer.to_string(),
        icon: icon.to_string(),
        category: Some(category.to_string()),
        topic: Some(topic.to_string()),
    }
}

pub fn entries() -> Vec<FaqEntry> {
    vec![
        entry(
            "horario",
            "¿Cuál es su horario de atención?",
            "Nuestro horario de atención es de lunes a viernes de 8:00 a 18:00 y sábados de 08:00 a 13:00.",
            "🕐",
            "general",
            "horarios",
        ),
        entry(
            "ubicacion",
            "¿Dónde están ubicados?",
            "Actualmente no tenemos una ubicación física, estamos en la web. Nos puede contactar por Facebook o WhatsApp.",
            "📍",
            "general",
            "ubicación",
        ),
        entry(
            "servicios",
            "¿Qué servicios ofrecen?",
            "Ofrecemos servicios de consultoría, desarrollo de software, soporte técnico, hosting, dominio y mantenimiento web.",
            "💼",
            "servicios",
            "servicios",
        ),
        entry(
            "soporte",
            "¿Cómo puedo contactar con soporte?",
            "Puedes contactar a soporte por teléfono al 916386651, email a: gabrielrc6979@gmail.com, por Facebook en: https://www.facebook.com/profile.php?id=61585909102748 o a través de nuestro portal web.",
            "📞",
            "general",
            "contacto",
        ),
        entry(
            "planes",
            "¿Cuáles son todos sus planes y precios?",
            "🔹 PLAN BÁSICO – Presencia Digital\n\n\
            💰 Desde S/ 500 – S/ 800\n\n\
            Ideal para emprendedores y negocios pequeños.\n\n\
            ✔ Página web tipo Landing Page\n\
            ✔ Hasta 4 secciones (Inicio, Servicios, Nosotros, Contacto)\n\
            ✔ Diseño moderno y responsive (PC, tablet, celular)\n\
            ✔ Formulario de contacto (WhatsApp o correo)\n\
            ✔ Dominio y hosting (opcional)\n\
            ✔ Entrega rápida (5–7 días)\n\n\
            🔹 PLAN PROFESIONAL – Negocio en Crecimiento\n\n\
            💰 Desde S/ 1,200 – S/ 1,800\n\n\
            Para empresas que buscan mayor impacto y confianza.\n\n\
            ✔ Página web corporativa\n\
            ✔ Hasta 8 secciones\n\
            ✔ Diseño personalizado\n\
            ✔ Integración con WhatsApp Business\n\
            ✔ Google Maps y redes sociales\n\
            ✔ Optimización básica SEO\n\
            ✔ Panel autoadministrable (opcional)\n\
            ✔ Entrega en 7–12 días\n\n\
            🔹 PLAN EMPRESARIAL – Alta Presencia Online\n\n\
            💰 Desde S/ 2,500 – S/ 4,000\n\n\
            Para empresas consolidadas o proyectos grandes.\n\n\
            ✔ Diseño a medida\n\
            ✔ Páginas ilimitadas\n\
            ✔ Panel administrador completo\n\
            ✔ Optimización SEO avanzada\n\
            ✔ Integración con APIs / sistemas externos\n\
            ✔ Seguridad y rendimiento optimizado\n\
            ✔ Soporte técnico por 3 meses\n\
            ✔ Capacitación incluida\n\n\
            🔹 PLAN TIENDA VIRTUAL (E-Commerce)\n\n\
            💰 Desde S/ 2,000 – S/ 3,500\n\n\
            Para vender productos o servicios online.\n\n\
            ✔ Catálogo de productos\n\
            ✔ Carrito de compras\n\
            ✔ Gestión de pedidos\n\
            ✔ Panel administrador\n\
            ✔ Diseño responsive\n\
            ✔ Capacitación de uso\n ❌El código fuente NO se incluye automáticamente en los planes normales de desarrollo web.",
            "📋",
            "planes",
            "planes de precios",
        ),
        entry(
            "mantenimiento",
            "¿Ofrecen planes de mantenimiento web?",
            "🔧 PLANES DE MANTENIMIENTO WEB\n\n\
            🔹 PLAN BÁSICO – Soporte Esencial\n\n\
            💰 S/ 100 – S/ 150 / mes\n\n\
            Ideal para páginas informativas o landing pages.\n\n\
            ✔ Actualización de textos e imágenes (hasta 2 cambios/mes)\n\
            ✔ Copia de seguridad mensual\n\
            ✔ Revisión básica de funcionamiento\n\
            ✔ Soporte vía WhatsApp\n\
            ✔ Monitoreo básico del sitio\n\n\
            🔹 PLAN PROFESIONAL – Mantenimiento Activo\n\n\
            💰 S/ 200 – S/ 300 / mes\n\n\
            Para negocios que dependen de su web.\n\n\
            ✔ Cambios de contenido (hasta 5 cambios/mes)\n\
            ✔ Copias de seguridad semanales\n\
            ✔ Optimización de rendimiento\n\
            ✔ Actualizaciones de plugins / sistema\n\
            ✔ Seguridad básica\n\
            ✔ Soporte prioritario\n\
            ✔ Reporte mensual\n\n\
            🔹 PLAN EMPRESARIAL – Gestión Completa\n\n\
            💰 S/ 400 – S/ 600 / mes\n\n\
            Para empresas y tiendas virtuales.\n\n\
            ✔ Cambios ilimitados de contenido\n\
            ✔ Copias de seguridad diarias\n\
            ✔ Seguridad avanzada (firewall, antimalware)\n\
            ✔ Optimización SEO continua\n\
            ✔ Monitoreo 24/7\n\
            ✔ Corrección de errores críticos\n\
            ✔ Soporte inmediato\n\
            ✔ Reporte detallado mensual\n\n\
            🔹 PLAN E-COMMERCE\n\n\
            💰 S/ 500 – S/ 800 / mes\n\n\
            Exclusivo para tiendas virtuales.\n\n\
            ✔ Gestión de productos (hasta 20/mes)\n\
            ✔ Soporte en pagos y pedidos\n\
            ✔ Copias de seguridad diarias\n\
            ✔ Seguridad avanzada\n\
            ✔ Optimización de velocidad\n\
            ✔ Soporte prioritario\n\
            ✔ Reporte de ventas básico\n\n\
            🔁 PLAN ANUAL (DESCUENTO)\n\n\
            🎁 1 mes GRATIS contratando 12 meses\n\
            🎁 Prioridad en soporte\n\
            🎁 Ajustes adicionales sin costo\n\n\
            📌 Nota importante:\n\
            El mantenimiento no incluye rediseños completos ni nuevas funcionalidades mayores.\n\
            Estos se cotizan por separado.",
            "🔧",
            "mantenimiento",
            "mantenimiento web",
        ),
        entry(
            "hosting",
            "¿Ofrecen hosting y dominio?",
            "💰 Dominio + Hosting + Configuración: S/ 300 – S/ 400",
            "🌐",
            "hosting",
            "hosting y dominio",
        ),
        entry(
            "pagos",
            "¿Aceptan pagos con tarjeta?",
            "Aceptamos transferencias bancarias a BCP, BBVA, Yape y Plin.",
            "💳",
            "pagos",
            "métodos de pago",
        ),
    ]
}

// Order matters: the first keyword found in the input wins.
const KEYWORDS: &[(&str, &str)] = &[
    ("horario", "horario"),
    ("ubicado", "ubicacion"),
    ("ubicación", "ubicacion"),
    ("servicios", "servicios"),
    ("contacto", "soporte"),
    ("soporte", "soporte"),
    ("precio", "planes"),
    ("plan", "planes"),
    ("planes", "planes"),
    ("pagos", "pagos"),
    ("tarjeta", "pagos"),
    ("mantenimiento", "mantenimiento"),
    ("mantener", "mantenimiento"),
    ("actualización", "mantenimiento"),
    ("hosting", "hosting"),
    ("hostinger", "hosting"),
    ("dominio", "hosting"),
    ("servidor", "hosting"),
    ("alojamiento", "hosting"),
    ("web", "servicios"),
    ("sitio", "servicios"),
    ("página", "servicios"),
];

pub fn keywords() -> Vec<KeywordRule> {
    KEYWORDS
        .iter()
        .map(|(keyword, target)| KeywordRule::new(*keyword, *target))
        .collect()
}
